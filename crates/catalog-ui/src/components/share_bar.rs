use crate::themes::Theme;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use catalog_core::formatting::{format_count, format_percent};

/// Configuration controlling visual appearance of a share bar.
pub struct ShareBarConfig {
    /// Width in terminal columns of the bar portion.
    pub width: u16,
    /// Character used to fill the share.
    pub filled_char: char,
    /// Character used to fill the remainder.
    pub empty_char: char,
}

impl Default for ShareBarConfig {
    fn default() -> Self {
        Self {
            width: 40,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
        }
    }
}

/// One pie slice drawn as a horizontal bar.
///
/// Renders as `label │█████░░░░░ 32% (1,234)`. A pulled slice gets a `▸`
/// marker in front of its label.
pub struct ShareBar<'a> {
    pub label: &'a str,
    /// Share of the whole, clamped to `[0.0, 100.0]`.
    pub percentage: f64,
    pub count: u64,
    /// Column width the label is padded to.
    pub label_width: usize,
    pub pulled: bool,
    pub style: Style,
    pub theme: &'a Theme,
    pub config: ShareBarConfig,
}

impl<'a> ShareBar<'a> {
    pub fn new(label: &'a str, percentage: f64, count: u64, style: Style, theme: &'a Theme) -> Self {
        Self {
            label,
            percentage: percentage.clamp(0.0, 100.0),
            count,
            label_width: label.width(),
            pulled: false,
            style,
            theme,
            config: ShareBarConfig::default(),
        }
    }

    pub fn label_width(mut self, width: usize) -> Self {
        self.label_width = width;
        self
    }

    pub fn pulled(mut self, pulled: bool) -> Self {
        self.pulled = pulled;
        self
    }

    pub fn to_line(&self) -> Line<'static> {
        let filled = ((self.percentage / 100.0) * self.config.width as f64).round() as u16;
        let filled = filled.min(self.config.width);
        let empty = self.config.width - filled;

        let filled_str: String =
            std::iter::repeat_n(self.config.filled_char, filled as usize).collect();
        let empty_str: String =
            std::iter::repeat_n(self.config.empty_char, empty as usize).collect();

        let marker = if self.pulled { "\u{25B8} " } else { "  " };
        let padding = " ".repeat(self.label_width.saturating_sub(self.label.width()));

        Line::from(vec![
            Span::styled(marker, self.style),
            Span::styled(format!("{}{} ", self.label, padding), self.theme.label),
            Span::styled(filled_str, self.style),
            Span::styled(empty_str, self.theme.share_empty),
            Span::styled(
                format!(
                    " {} ({})",
                    format_percent(self.percentage),
                    format_count(self.count)
                ),
                self.theme.value,
            ),
        ])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_share_bar_half() {
        let theme = Theme::dark();
        let bar = ShareBar::new("Movie", 50.0, 1234, theme.text, &theme);
        let line = bar.to_line();
        let text = text_of(&line);

        assert_eq!(line.spans[2].content.chars().count(), 20);
        assert_eq!(line.spans[3].content.chars().count(), 20);
        assert!(text.contains("50% (1,234)"), "got: {text}");
    }

    #[test]
    fn test_share_bar_clamps() {
        let theme = Theme::dark();
        let bar = ShareBar::new("x", 140.0, 1, theme.text, &theme);
        assert_eq!(bar.percentage, 100.0);
        let line = bar.to_line();
        assert_eq!(line.spans[3].content.chars().count(), 0);
    }

    #[test]
    fn test_share_bar_label_padding() {
        let theme = Theme::dark();
        let bar = ShareBar::new("TV", 10.0, 1, theme.text, &theme).label_width(8);
        let line = bar.to_line();
        assert_eq!(line.spans[1].content.as_ref(), "TV       ");
    }

    #[test]
    fn test_share_bar_pulled_marker() {
        let theme = Theme::dark();
        let pulled = ShareBar::new("Movie", 60.0, 6, theme.text, &theme).pulled(true);
        assert!(text_of(&pulled.to_line()).starts_with('\u{25B8}'));
        let flat = ShareBar::new("Movie", 60.0, 6, theme.text, &theme);
        assert!(text_of(&flat.to_line()).starts_with("  "));
    }
}
