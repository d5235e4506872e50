use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the gallery title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Gallery header rendering three lines:
///
/// 1. Figure title with sparkle decorations.
/// 2. A 60-column `=` separator.
/// 3. Position and view id in `[ 3/11 | seasons ]` format.
pub struct Header<'a> {
    pub title: &'a str,
    pub view: &'a str,
    /// 1-based index of the figure on screen.
    pub position: usize,
    pub total: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str, view: &'a str, position: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            title,
            view,
            position,
            total,
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(format!(" {} ", self.title), self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled("=".repeat(60), self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(format!("{}/{}", self.position, self.total), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.view, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
