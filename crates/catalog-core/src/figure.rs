//! Renderer-independent chart description.
//!
//! A [`Figure`] is what every view returns: one or more [`Trace`]s plus
//! layout hints. The terminal gallery draws it and the JSON export
//! serializes it verbatim.

use serde::{Deserialize, Serialize};

/// Palette colour used for TV show series.
pub const TV_SHOW_COLOR: &str = "#a678de";
/// Palette colour used for movie series.
pub const MOVIE_COLOR: &str = "#6ad49b";
/// Palette colour used for director rankings.
pub const DIRECTOR_COLOR: &str = "#ffa500";

/// Visual form of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    /// Proportional slices.
    Pie,
    /// Vertical bars, labels on the x axis.
    Bar,
    /// Horizontal bars, labels on the y axis.
    HorizontalBar,
    /// Connected points, labels on the x axis.
    Line,
}

/// One data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Legend name.
    pub name: String,
    /// How the series is drawn.
    pub kind: TraceKind,
    /// Category labels, one per value.
    pub labels: Vec<String>,
    /// Counts, one per label.
    pub values: Vec<u64>,
    /// Share of each value in the series total, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentages: Option<Vec<f64>>,
    /// Single series colour as `#rrggbb`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Per-slice colours (pie only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    /// Per-slice offset from the centre (pie only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pull: Vec<f64>,
    /// Annotate each bar with its count.
    #[serde(default)]
    pub count_labels: bool,
    /// 1-based `(row, col)` grid cell for multi-panel figures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<(u16, u16)>,
}

impl Trace {
    /// Create a trace of `kind` from parallel label/value lists.
    pub fn new(
        kind: TraceKind,
        name: impl Into<String>,
        labels: Vec<String>,
        values: Vec<u64>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            labels,
            values,
            percentages: None,
            color: None,
            colors: Vec::new(),
            pull: Vec::new(),
            count_labels: false,
            cell: None,
        }
    }

    pub fn pie(labels: Vec<String>, values: Vec<u64>) -> Self {
        Self::new(TraceKind::Pie, "", labels, values)
    }

    pub fn bar(name: impl Into<String>, labels: Vec<String>, values: Vec<u64>) -> Self {
        Self::new(TraceKind::Bar, name, labels, values)
    }

    pub fn horizontal_bar(name: impl Into<String>, labels: Vec<String>, values: Vec<u64>) -> Self {
        Self::new(TraceKind::HorizontalBar, name, labels, values)
    }

    pub fn line(name: impl Into<String>, labels: Vec<String>, values: Vec<u64>) -> Self {
        Self::new(TraceKind::Line, name, labels, values)
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_colors(mut self, colors: &[&str]) -> Self {
        self.colors = colors.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_pull(mut self, pull: &[f64]) -> Self {
        self.pull = pull.to_vec();
        self
    }

    pub fn with_percentages(mut self, percentages: Vec<f64>) -> Self {
        self.percentages = Some(percentages);
        self
    }

    pub fn with_count_labels(mut self) -> Self {
        self.count_labels = true;
        self
    }

    pub fn in_cell(mut self, row: u16, col: u16) -> Self {
        self.cell = Some((row, col));
        self
    }

    /// Sum of all values.
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }

    /// Largest single value, `0` for an empty trace.
    pub fn max_value(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Legend placement hint, in figure-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub x: f64,
    pub y: f64,
    pub horizontal: bool,
}

impl Legend {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            horizontal: false,
        }
    }

    pub fn horizontal(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            horizontal: true,
        }
    }
}

/// Subplot arrangement for multi-panel figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: u16,
    pub cols: u16,
    /// Titles in row-major order; blank entries leave a cell untitled.
    pub subplot_titles: Vec<String>,
}

impl Grid {
    /// Title of the 1-based cell `(row, col)`, if any.
    pub fn title_of(&self, row: u16, col: u16) -> Option<&str> {
        if row == 0 || col == 0 || row > self.rows || col > self.cols {
            return None;
        }
        let index = usize::from((row - 1) * self.cols + (col - 1));
        self.subplot_titles
            .get(index)
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }
}

/// Figure-level presentation settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    pub show_legend: bool,
}

/// A complete chart: traces plus layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Stable view identifier, e.g. `"yearly"`.
    pub view: String,
    pub layout: Layout,
    pub traces: Vec<Trace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
}

impl Figure {
    pub fn new(view: impl Into<String>, title: impl Into<String>, traces: Vec<Trace>) -> Self {
        Self {
            view: view.into(),
            layout: Layout {
                title: title.into(),
                show_legend: true,
                ..Layout::default()
            },
            traces,
            grid: None,
        }
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.layout.height = Some(height);
        self
    }

    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.layout.legend = Some(legend);
        self
    }

    pub fn without_legend(mut self) -> Self {
        self.layout.show_legend = false;
        self
    }

    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Title shown to the user, falling back to the view id.
    pub fn display_title(&self) -> &str {
        if self.layout.title.is_empty() {
            &self.view
        } else {
            &self.layout.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_trace_builders() {
        let trace = Trace::bar("TV Shows", labels(&["1", "2"]), vec![3, 4])
            .with_color(TV_SHOW_COLOR)
            .with_count_labels()
            .in_cell(2, 3);
        assert_eq!(trace.kind, TraceKind::Bar);
        assert_eq!(trace.color.as_deref(), Some(TV_SHOW_COLOR));
        assert!(trace.count_labels);
        assert_eq!(trace.cell, Some((2, 3)));
        assert_eq!(trace.total(), 7);
        assert_eq!(trace.max_value(), 4);
    }

    #[test]
    fn test_empty_trace_max_value() {
        let trace = Trace::line("Movies", Vec::new(), Vec::new());
        assert!(trace.is_empty());
        assert_eq!(trace.max_value(), 0);
    }

    #[test]
    fn test_grid_title_of() {
        let grid = Grid {
            rows: 2,
            cols: 5,
            subplot_titles: labels(&[
                "United States",
                "",
                "India",
                "",
                "United Kingdom",
                "Canada",
                "",
                "Spain",
                "",
                "Japan",
            ]),
        };
        assert_eq!(grid.title_of(1, 1), Some("United States"));
        assert_eq!(grid.title_of(1, 2), None);
        assert_eq!(grid.title_of(2, 5), Some("Japan"));
        assert_eq!(grid.title_of(3, 1), None);
        assert_eq!(grid.title_of(0, 1), None);
    }

    #[test]
    fn test_display_title_falls_back_to_view() {
        let fig = Figure::new("types", "", vec![]);
        assert_eq!(fig.display_title(), "types");
        let fig = Figure::new("monthly", "Monthly additions", vec![]);
        assert_eq!(fig.display_title(), "Monthly additions");
    }

    #[test]
    fn test_figure_json_skips_empty_optionals() {
        let fig = Figure::new(
            "types",
            "",
            vec![Trace::pie(labels(&["Movie"]), vec![1])],
        );
        let json = serde_json::to_value(&fig).unwrap();
        assert_eq!(json["view"], "types");
        assert_eq!(json["traces"][0]["kind"], "pie");
        assert!(json.get("grid").is_none());
        assert!(json["traces"][0].get("color").is_none());
    }
}
