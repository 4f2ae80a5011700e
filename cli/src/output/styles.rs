//! Terminal stylesheet for fsm output

use owo_colors::Style;

/// Styles applied to status markers and listings; plain when colors are off.
#[derive(Default, Clone)]
pub struct Styles {
    pub success: Style,
    pub warning: Style,
    /// Arrow in front of in-progress steps.
    pub step: Style,
    /// Keys in key/value summaries.
    pub dim: Style,
    /// Table headers.
    pub bold: Style,
    pub header: Style,
    /// Version labels in `list`.
    pub version: Style,
}

impl Styles {
    /// Apply colors to the stylesheet.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.step = Style::new().blue();
        self.dim = Style::new().dimmed();
        self.bold = Style::new().bold();
        self.header = Style::new().bold().cyan();
        self.version = Style::new().magenta();
    }
}
