use ratatui::text::Line;
use ratatui_diffview::DiffLimits;
use ratatui_diffview::theme::Theme;
use ratatui_diffview::view::{DiffView, DiffViewOptions};
use std::env;
use std::fs;
use std::io::{self, Read};

fn main() -> io::Result<()> {
    env_logger::init();

    let args = env::args().skip(1).collect::<Vec<_>>();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_help();
        return Ok(());
    }

    let mut options = DiffViewOptions {
        show_scrollbar: false,
        ..DiffViewOptions::default()
    };
    let mut diff_path: Option<String> = None;
    let mut expand_all = false;
    let mut max_lines: Option<usize> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--diff" => {
                diff_path = Some(parse_string(&args, &mut i, "--diff")?);
            }
            "--max-run" => {
                options.max_unchanged_run = parse_usize(&args, &mut i, "--max-run")?;
            }
            "--max-lines" => {
                max_lines = Some(parse_usize(&args, &mut i, "--max-lines")?);
            }
            "--expand-all" => {
                expand_all = true;
                i += 1;
            }
            "--no-line-numbers" => {
                options.show_line_numbers = false;
                i += 1;
            }
            _ => break,
        }
    }

    let mut view = DiffView::with_options(options);
    match (diff_path, &args[i..]) {
        (Some(path), []) => {
            let diff = if path == "-" {
                let mut s = String::new();
                io::stdin().read_to_string(&mut s)?;
                s
            } else {
                fs::read_to_string(path)?
            };
            view.set_unified_diff(&diff);
        }
        (None, [old, new]) => {
            let old = fs::read_to_string(old)?;
            let new = fs::read_to_string(new)?;
            let limits = match max_lines {
                Some(n) => DiffLimits {
                    max_lines_per_side: n,
                    ..DiffLimits::default()
                },
                None => DiffLimits::default(),
            };
            view.set_texts_bounded(&old, &new, &limits)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        }
        _ => {
            print_help();
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "expected OLD NEW or --diff FILE",
            ));
        }
    }

    if expand_all {
        view.expand_all();
    }

    let theme = Theme::default();
    for line in view.to_lines(&theme) {
        println!("{}", line_to_plain(&line));
    }
    eprintln!("{}", view.stats());

    Ok(())
}

fn print_help() {
    eprintln!(
        "Usage: dump [options] OLD NEW\n\
       dump [options] --diff <path|->\n\
\n\
Options:\n\
  --diff <path>          Show a unified diff instead of comparing two files (- reads stdin)\n\
  --max-run <n>          Longest unchanged run shown in full (default: 8)\n\
  --max-lines <n>        Refuse to compare files longer than this\n\
  --expand-all           Reveal every collapsed region\n\
  --no-line-numbers      Hide the line-number gutter\n\
  -h, --help             Show this help\n\
\n\
Set RUST_LOG=debug to see engine diagnostics."
    );
}

fn parse_usize(args: &[String], i: &mut usize, flag: &str) -> io::Result<usize> {
    let v = parse_string(args, i, flag)?;
    v.parse::<usize>().map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{flag} invalid number: {e}"),
        )
    })
}

fn parse_string(args: &[String], i: &mut usize, flag: &str) -> io::Result<String> {
    let Some(v) = args.get(*i + 1) else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{flag} expects a value"),
        ));
    };
    *i += 2;
    Ok(v.to_string())
}

fn line_to_plain(line: &Line<'_>) -> String {
    line.spans
        .iter()
        .map(|s| s.content.as_ref())
        .collect::<Vec<_>>()
        .join("")
}
