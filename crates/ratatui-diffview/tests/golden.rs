use ratatui::text::Line;
use ratatui_diffview::theme::Theme;
use ratatui_diffview::view::{DiffView, DiffViewOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
enum Source {
    Texts { old: &'static str, new: &'static str },
    Unified(&'static str),
}

#[derive(Clone, Debug)]
struct GoldenCase {
    name: &'static str,
    source: Source,
    options: DiffViewOptions,
    expand_all: bool,
}

fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .canonicalize()
        .expect("repo root")
}

fn read_fixture(rel: &str) -> String {
    fs::read_to_string(repo_root().join("docs/fixtures/diff").join(rel)).expect("read fixture")
}

fn golden_path(case: &GoldenCase) -> PathBuf {
    repo_root()
        .join("docs/fixtures/golden/diffview")
        .join(format!("{}.txt", case.name))
}

fn normalize(s: &str) -> String {
    let mut out = String::new();
    for (i, line) in s.replace("\r\n", "\n").split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.trim_end());
    }
    out.trim_end_matches('\n').to_string()
}

fn line_to_plain(line: &Line<'_>) -> String {
    line.spans
        .iter()
        .map(|s| s.content.as_ref())
        .collect::<Vec<_>>()
        .join("")
}

fn render(case: &GoldenCase) -> String {
    let mut view = DiffView::with_options(case.options.clone());
    match case.source {
        Source::Texts { old, new } => view.set_texts(&read_fixture(old), &read_fixture(new)),
        Source::Unified(path) => view.set_unified_diff(&read_fixture(path)),
    }
    if case.expand_all {
        view.expand_all();
    }
    let theme = Theme::default();
    let lines = view
        .to_lines(&theme)
        .iter()
        .map(line_to_plain)
        .collect::<Vec<_>>()
        .join("\n");
    normalize(&lines)
}

fn update_goldens_enabled() -> bool {
    matches!(
        std::env::var("UPDATE_GOLDENS").as_deref(),
        Ok("1" | "true" | "yes")
    )
}

fn check_golden(case: GoldenCase) {
    let got = render(&case);
    let path = golden_path(&case);

    if update_goldens_enabled() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create golden dir");
        }
        fs::write(&path, format!("{got}\n")).expect("write golden");
        return;
    }

    let expected = fs::read_to_string(&path).unwrap_or_else(|_| {
        panic!(
            "missing golden file: {}\nRun: UPDATE_GOLDENS=1 cargo test -p ratatui-diffview golden",
            path.display()
        )
    });
    let expected = normalize(&expected);
    assert_eq!(
        got,
        expected,
        "golden mismatch: {}\nRun: UPDATE_GOLDENS=1 cargo test -p ratatui-diffview golden",
        path.display()
    );
}

fn texts(name: &'static str, old: &'static str, new: &'static str) -> GoldenCase {
    GoldenCase {
        name,
        source: Source::Texts { old, new },
        options: DiffViewOptions::default(),
        expand_all: false,
    }
}

#[test]
fn golden_cargo_toml() {
    check_golden(texts("cargo_toml", "cargo.old.toml", "cargo.new.toml"));
}

#[test]
fn golden_long_run_collapsed() {
    check_golden(texts("long_run", "long_run.old.txt", "long_run.new.txt"));
}

#[test]
fn golden_long_run_expanded() {
    check_golden(GoldenCase {
        expand_all: true,
        ..texts("long_run__expanded", "long_run.old.txt", "long_run.new.txt")
    });
}

#[test]
fn golden_long_run_higher_threshold() {
    check_golden(GoldenCase {
        options: DiffViewOptions {
            max_unchanged_run: 12,
            ..DiffViewOptions::default()
        },
        ..texts("long_run__max_run_12", "long_run.old.txt", "long_run.new.txt")
    });
}

#[test]
fn golden_unified_diff() {
    check_golden(GoldenCase {
        name: "lib_rs_diff",
        source: Source::Unified("lib_rs.diff"),
        options: DiffViewOptions::default(),
        expand_all: false,
    });
}

#[test]
fn golden_unified_diff_without_line_numbers() {
    check_golden(GoldenCase {
        name: "lib_rs_diff__no_numbers",
        source: Source::Unified("lib_rs.diff"),
        options: DiffViewOptions {
            show_line_numbers: false,
            ..DiffViewOptions::default()
        },
        expand_all: false,
    });
}
