use ratatui::style::Style;

#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub diff_add: Style,
    pub diff_del: Style,
    /// Placeholder rows standing in for collapsed unchanged lines.
    pub collapsed: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            diff_add: Style::default().green(),
            diff_del: Style::default().red(),
            collapsed: Style::default().dark_gray().italic(),
        }
    }
}
