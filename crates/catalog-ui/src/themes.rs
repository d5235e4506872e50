use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are considered dark; 7–15 are considered light. If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        return background_from_colorfgbg(&val);
    }
    BackgroundType::Dark
}

fn background_from_colorfgbg(val: &str) -> BackgroundType {
    if let Some(bg) = val.split(';').next_back() {
        if let Ok(bg_num) = bg.parse::<u8>() {
            return if bg_num <= 6 {
                BackgroundType::Dark
            } else {
                BackgroundType::Light
            };
        }
    }
    BackgroundType::Unknown
}

/// Styles used by the chart gallery.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_sparkle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,
    pub warning: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub border: Style,
    pub axis: Style,
    /// Count printed on or next to a bar.
    pub bar_value: Style,
    /// Unfilled remainder of a share bar.
    pub share_empty: Style,
    /// Series colours used when a trace carries none, or when the theme
    /// cannot show true colour.
    pub palette: Vec<Color>,
    /// Whether `#rrggbb` trace colours are honoured.
    pub true_color: bool,
}

impl Theme {
    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            warning: Style::default().fg(Color::Yellow),

            border: Style::default().fg(Color::DarkGray),
            axis: Style::default().fg(Color::Gray),
            bar_value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            share_empty: Style::default().fg(Color::DarkGray),
            palette: vec![
                Color::Magenta,
                Color::Green,
                Color::Cyan,
                Color::Yellow,
                Color::Blue,
                Color::Red,
            ],
            true_color: true,
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            warning: Style::default().fg(Color::Red),

            border: Style::default().fg(Color::Gray),
            axis: Style::default().fg(Color::DarkGray),
            bar_value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            share_empty: Style::default().fg(Color::Gray),
            palette: vec![
                Color::Magenta,
                Color::Green,
                Color::Blue,
                Color::Red,
                Color::Cyan,
                Color::Yellow,
            ],
            true_color: true,
        }
    }

    /// Basic 8-colour ANSI theme; ignores hex trace colours.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_sparkle: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),
            warning: Style::default().fg(Color::Yellow),

            border: Style::default().fg(Color::White),
            axis: Style::default().fg(Color::White),
            bar_value: Style::default().fg(Color::Black),
            share_empty: Style::default().fg(Color::DarkGray),
            palette: vec![Color::Magenta, Color::Green, Color::Cyan, Color::Yellow],
            true_color: false,
        }
    }

    /// Select a theme by name.
    ///
    /// `"auto"` inspects the terminal background; unknown names fall back to
    /// the dark theme.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "classic" => Self::classic(),
            "auto" => match detect_background() {
                BackgroundType::Light => Self::light(),
                BackgroundType::Dark | BackgroundType::Unknown => Self::dark(),
            },
            _ => Self::dark(),
        }
    }

    /// Colour of the `index`-th series, honouring its own `#rrggbb` colour
    /// when the theme allows it.
    pub fn series_color(&self, color: Option<&str>, index: usize) -> Color {
        if self.true_color {
            if let Some(parsed) = color.and_then(|c| Color::from_str(c).ok()) {
                return parsed;
            }
        }
        self.palette
            .get(index % self.palette.len().max(1))
            .copied()
            .unwrap_or(Color::White)
    }

    pub fn series_style(&self, color: Option<&str>, index: usize) -> Style {
        Style::default().fg(self.series_color(color, index))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert_eq!(t.warning.fg, Some(Color::Yellow));
        assert!(t.true_color);
        assert!(!t.palette.is_empty());
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.header.fg, Some(Color::Blue));
        assert_eq!(t.text.fg, Some(Color::Black));
    }

    #[test]
    fn test_classic_theme_has_no_bold_header() {
        let t = Theme::classic();
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert!(!t.header.add_modifier.contains(Modifier::BOLD));
        assert!(!t.true_color);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("light").header.fg, Some(Color::Blue));
        assert_eq!(Theme::from_name("CLASSIC").header.fg, Some(Color::Cyan));
        assert!(Theme::from_name("does-not-exist").header.fg.is_some());
    }

    #[test]
    fn test_background_from_colorfgbg() {
        assert_eq!(background_from_colorfgbg("15;0"), BackgroundType::Dark);
        assert_eq!(background_from_colorfgbg("0;15"), BackgroundType::Light);
        assert_eq!(background_from_colorfgbg("garbage"), BackgroundType::Unknown);
    }

    #[test]
    fn test_series_color_hex() {
        let t = Theme::dark();
        assert_eq!(
            t.series_color(Some("#a678de"), 0),
            Color::Rgb(0xa6, 0x78, 0xde)
        );
    }

    #[test]
    fn test_series_color_falls_back_to_palette() {
        let t = Theme::dark();
        assert_eq!(t.series_color(None, 1), t.palette[1]);
        assert_eq!(t.series_color(Some("not-a-colour"), 0), t.palette[0]);

        let classic = Theme::classic();
        assert_eq!(classic.series_color(Some("#a678de"), 0), classic.palette[0]);
    }
}
