//! Terminal rendering of a [`Figure`].
//!
//! Bar traces become a [`BarChart`], line traces a [`Chart`], and pie traces
//! a stack of share bars. Multi-panel figures are split into an equal grid
//! and each trace is drawn in its own cell.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols,
    text::{Line, Span, Text},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use catalog_core::figure::{Figure, Trace, TraceKind};
use catalog_core::formatting::format_count;

use crate::components::share_bar::{ShareBar, ShareBarConfig};
use crate::themes::Theme;

/// Widest label drawn next to a horizontal bar before it is truncated.
pub const MAX_LABEL_WIDTH: usize = 24;

/// Render `figure` into `area`, framed by a bordered block carrying its title.
pub fn render_figure(frame: &mut Frame, area: Rect, figure: &Figure, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(format!(" {} ", figure.display_title()), theme.header));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if figure.traces.iter().all(Trace::is_empty) {
        render_no_data(frame, inner, theme);
        return;
    }

    let legend = if figure.layout.show_legend {
        legend_line(&figure.traces, theme)
    } else {
        None
    };
    let chart_area = match legend {
        Some(line) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(inner);
            frame.render_widget(Paragraph::new(line), chunks[1]);
            chunks[0]
        }
        None => inner,
    };

    match &figure.grid {
        Some(grid) => {
            let rows = split_even(chart_area, grid.rows, Direction::Vertical);
            for (r, row_area) in rows.iter().enumerate() {
                let cells = split_even(*row_area, grid.cols, Direction::Horizontal);
                for (c, cell_area) in cells.iter().enumerate() {
                    let (row, col) = (r as u16 + 1, c as u16 + 1);
                    let traces: Vec<&Trace> = figure
                        .traces
                        .iter()
                        .filter(|t| t.cell == Some((row, col)))
                        .collect();
                    if traces.is_empty() {
                        continue;
                    }
                    let cell_block = Block::default()
                        .borders(Borders::TOP)
                        .border_style(theme.separator)
                        .title(Span::styled(
                            grid.title_of(row, col).unwrap_or_default().to_string(),
                            theme.label,
                        ));
                    let cell_inner = cell_block.inner(*cell_area);
                    frame.render_widget(cell_block, *cell_area);
                    render_traces(frame, cell_inner, &traces, theme);
                }
            }
        }
        None => {
            let traces: Vec<&Trace> = figure.traces.iter().collect();
            render_traces(frame, chart_area, &traces, theme);
        }
    }
}

/// Placeholder shown when a figure has nothing to plot.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No data to plot", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Check the input file and the selected view.",
            theme.dim,
        )),
    ];
    frame.render_widget(Paragraph::new(Text::from(text)), area);
}

fn render_traces(frame: &mut Frame, area: Rect, traces: &[&Trace], theme: &Theme) {
    let Some(first) = traces.first() else {
        return;
    };
    match first.kind {
        TraceKind::Pie => render_shares(frame, area, traces, theme),
        TraceKind::Bar => render_grouped_bars(frame, area, traces, theme),
        TraceKind::HorizontalBar => render_horizontal_bars(frame, area, first, theme),
        TraceKind::Line => render_lines(frame, area, traces, theme),
    }
}

fn render_shares(frame: &mut Frame, area: Rect, traces: &[&Trace], theme: &Theme) {
    let label_width = traces
        .iter()
        .flat_map(|t| t.labels.iter())
        .map(|l| l.width())
        .max()
        .unwrap_or(0)
        .min(MAX_LABEL_WIDTH);
    // marker, label, spacer, percentage and count
    let bar_width = (area.width as usize)
        .saturating_sub(label_width + 18)
        .clamp(10, 60) as u16;

    let mut lines = Vec::new();
    for trace in traces {
        let shares = share_of_total(trace);
        for (i, (label, count)) in trace.labels.iter().zip(&trace.values).enumerate() {
            let color = trace.colors.get(i).map(String::as_str);
            let label = truncate_label(label, MAX_LABEL_WIDTH);
            let bar = ShareBar {
                config: ShareBarConfig {
                    width: bar_width,
                    ..ShareBarConfig::default()
                },
                ..ShareBar::new(&label, shares[i], *count, theme.series_style(color, i), theme)
                    .label_width(label_width)
                    .pulled(trace.pull.get(i).is_some_and(|p| *p > 0.0))
            };
            lines.push(bar.to_line());
        }
        lines.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

fn render_grouped_bars(frame: &mut Frame, area: Rect, traces: &[&Trace], theme: &Theme) {
    let axis = shared_axis(traces);
    let series = traces.len().max(1) as u16;
    let slots = (axis.len() as u16).max(1);
    let group_gap = 1;
    let bar_width = (area.width.saturating_sub(slots * group_gap) / (slots * series)).clamp(1, 9);

    let mut chart = BarChart::default()
        .direction(Direction::Vertical)
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(group_gap)
        .label_style(theme.axis)
        .max(traces.iter().map(|t| t.max_value()).max().unwrap_or(0).max(1));

    for label in &axis {
        let bars: Vec<Bar> = traces
            .iter()
            .enumerate()
            .map(|(i, trace)| {
                let value = value_of(trace, label);
                let bar = Bar::default()
                    .value(value)
                    .style(theme.series_style(trace.color.as_deref(), i))
                    .value_style(theme.bar_value);
                if trace.count_labels {
                    bar.text_value(format_count(value))
                } else {
                    bar.text_value(String::new())
                }
            })
            .collect();
        let group = BarGroup::default()
            .label(Line::from(label.clone()))
            .bars(&bars);
        chart = chart.data(group);
    }
    frame.render_widget(chart, area);
}

fn render_horizontal_bars(frame: &mut Frame, area: Rect, trace: &Trace, theme: &Theme) {
    let style = theme.series_style(trace.color.as_deref(), 0);
    // Stored bottom to top; the terminal draws top to bottom.
    let bars: Vec<Bar> = trace
        .labels
        .iter()
        .zip(&trace.values)
        .rev()
        .map(|(label, value)| {
            Bar::default()
                .value(*value)
                .label(Line::from(truncate_label(label, MAX_LABEL_WIDTH)))
                .style(style)
                .value_style(theme.bar_value)
                .text_value(format_count(*value))
        })
        .collect();

    let chart = BarChart::default()
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .label_style(theme.label)
        .max(trace.max_value().max(1))
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn render_lines(frame: &mut Frame, area: Rect, traces: &[&Trace], theme: &Theme) {
    let axis = shared_axis(traces);
    let points: Vec<Vec<(f64, f64)>> = traces
        .iter()
        .map(|trace| {
            axis.iter()
                .enumerate()
                .map(|(x, label)| (x as f64, value_of(trace, label) as f64))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = traces
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(i, (trace, data))| {
            Dataset::default()
                .name(trace.name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(theme.series_style(trace.color.as_deref(), i))
                .data(data)
        })
        .collect();

    let x_max = axis.len().saturating_sub(1).max(1) as f64;
    let y_max = traces.iter().map(|t| t.max_value()).max().unwrap_or(0).max(1);
    let x_labels: Vec<Span> = match (axis.first(), axis.get(axis.len() / 2), axis.last()) {
        (Some(first), Some(mid), Some(last)) => vec![
            Span::styled(first.clone(), theme.axis),
            Span::styled(mid.clone(), theme.axis),
            Span::styled(last.clone(), theme.axis),
        ],
        _ => Vec::new(),
    };
    let y_labels = vec![
        Span::styled("0", theme.axis),
        Span::styled(format_count(y_max / 2), theme.axis),
        Span::styled(format_count(y_max), theme.axis),
    ];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([0.0, y_max as f64])
                .labels(y_labels),
        )
        .legend_position(None);
    frame.render_widget(chart, area);
}

/// One coloured swatch per named trace; `None` when there is nothing to list.
fn legend_line<'a>(traces: &'a [Trace], theme: &Theme) -> Option<Line<'a>> {
    let named: Vec<(usize, &Trace)> = traces
        .iter()
        .enumerate()
        .filter(|(_, t)| !t.name.is_empty() && t.kind != TraceKind::Pie)
        .collect();
    if named.is_empty() {
        return None;
    }
    let mut spans = Vec::with_capacity(named.len() * 2);
    for (i, trace) in named {
        spans.push(Span::styled(
            "\u{25A0} ",
            theme.series_style(trace.color.as_deref(), i),
        ));
        spans.push(Span::styled(format!("{}   ", trace.name), theme.text));
    }
    Some(Line::from(spans))
}

/// Union of all trace labels in first-seen order; numeric axes are sorted.
fn shared_axis(traces: &[&Trace]) -> Vec<String> {
    let mut axis: Vec<String> = Vec::new();
    for label in traces.iter().flat_map(|t| t.labels.iter()) {
        if !axis.contains(label) {
            axis.push(label.clone());
        }
    }
    let numeric: Option<Vec<i64>> = axis.iter().map(|l| l.parse().ok()).collect();
    if let Some(keys) = numeric {
        let mut pairs: Vec<(i64, String)> = keys.into_iter().zip(axis).collect();
        pairs.sort_by_key(|(k, _)| *k);
        axis = pairs.into_iter().map(|(_, l)| l).collect();
    }
    axis
}

fn value_of(trace: &Trace, label: &str) -> u64 {
    trace
        .labels
        .iter()
        .position(|l| l == label)
        .and_then(|i| trace.values.get(i).copied())
        .unwrap_or(0)
}

fn share_of_total(trace: &Trace) -> Vec<f64> {
    if let Some(pct) = &trace.percentages {
        if pct.len() == trace.values.len() {
            return pct.clone();
        }
    }
    let total = trace.total();
    trace
        .values
        .iter()
        .map(|v| {
            if total == 0 {
                0.0
            } else {
                100.0 * *v as f64 / total as f64
            }
        })
        .collect()
}

fn split_even(area: Rect, parts: u16, direction: Direction) -> Vec<Rect> {
    let parts = parts.max(1);
    Layout::default()
        .direction(direction)
        .constraints(vec![Constraint::Ratio(1, u32::from(parts)); usize::from(parts)])
        .split(area)
        .to_vec()
}

/// Cut `label` to at most `max` terminal columns, ending with `…` if cut.
pub fn truncate_label(label: &str, max: usize) -> String {
    if label.width() <= max {
        return label.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in label.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('\u{2026}');
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::figure::{Grid, Legend};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn draw(figure: &Figure) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_figure(frame, area, figure, &theme);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_pie() {
        let trace = Trace::pie(labels(&["Movie", "TV Show"]), vec![6, 4])
            .with_colors(&["#6ad49b", "#a678de"])
            .with_pull(&[0.05, 0.0]);
        let figure = Figure::new("types", "", vec![trace]).with_legend(Legend::at(0.1, 1.1));
        let screen = draw(&figure);
        assert!(screen.contains(" types "));
        assert!(screen.contains("Movie"));
        assert!(screen.contains("60% (6)"));
        assert!(screen.contains("40% (4)"));
    }

    #[test]
    fn test_render_grouped_bars() {
        let shows = Trace::bar("TV Shows", labels(&["TV-MA", "PG"]), vec![5, 1]);
        let movies = Trace::bar("Movies", labels(&["PG", "R"]), vec![3, 2]);
        let figure = Figure::new("ratings", "Ratings by type", vec![shows, movies]);
        let screen = draw(&figure);
        assert!(screen.contains("Ratings by type"));
        assert!(screen.contains("TV Shows"));
        assert!(screen.contains("Movies"));
    }

    #[test]
    fn test_render_horizontal_bars_leader_on_top() {
        let trace = Trace::horizontal_bar(
            "Directors",
            labels(&["Third", "Second", "First"]),
            vec![1, 2, 3],
        );
        let figure = Figure::new("directors", "Directors", vec![trace]);
        let screen = draw(&figure);
        let first = screen.find("First").unwrap();
        let third = screen.find("Third").unwrap();
        assert!(first < third);
    }

    #[test]
    fn test_render_lines() {
        let shows = Trace::line("TV Shows", labels(&["2017", "2018", "2019"]), vec![1, 4, 9]);
        let movies = Trace::line("Movies", labels(&["2016", "2019"]), vec![2, 3]);
        let figure = Figure::new("yearly", "Content added over the years", vec![shows, movies]);
        let screen = draw(&figure);
        assert!(screen.contains("2016"));
        assert!(screen.contains("2019"));
    }

    #[test]
    fn test_render_grid() {
        let traces = vec![
            Trace::horizontal_bar("", labels(&["B", "A"]), vec![1, 2]).in_cell(1, 1),
            Trace::horizontal_bar("", labels(&["D", "C"]), vec![1, 3]).in_cell(1, 3),
        ];
        let grid = Grid {
            rows: 1,
            cols: 3,
            subplot_titles: labels(&["India", "", "Japan"]),
        };
        let figure = Figure::new("cast", "Top cast by country", traces)
            .with_grid(grid)
            .without_legend();
        let screen = draw(&figure);
        assert!(screen.contains("India"));
        assert!(screen.contains("Japan"));
    }

    #[test]
    fn test_render_empty_figure_shows_placeholder() {
        let figure = Figure::new("seasons", "Seasons", vec![Trace::bar("x", vec![], vec![])]);
        let screen = draw(&figure);
        assert!(screen.contains("No data to plot"));
    }

    #[test]
    fn test_shared_axis_sorts_numeric_labels() {
        let a = Trace::line("a", labels(&["2019", "2017"]), vec![1, 1]);
        let b = Trace::line("b", labels(&["2015"]), vec![1]);
        assert_eq!(shared_axis(&[&a, &b]), labels(&["2015", "2017", "2019"]));

        let c = Trace::bar("c", labels(&["TV-MA", "PG"]), vec![1, 1]);
        let d = Trace::bar("d", labels(&["R", "PG"]), vec![1, 1]);
        assert_eq!(shared_axis(&[&c, &d]), labels(&["TV-MA", "PG", "R"]));
    }

    #[test]
    fn test_legend_line_names_series() {
        let theme = Theme::light();
        let traces = vec![
            Trace::bar("TV Shows", labels(&["a"]), vec![1]),
            Trace::bar("", labels(&["a"]), vec![1]),
            Trace::bar("Movies", labels(&["a"]), vec![2]),
        ];
        let line = legend_line(&traces, &theme).unwrap();
        let names: Vec<&str> = line
            .spans
            .iter()
            .skip(1)
            .step_by(2)
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(names, vec!["TV Shows   ", "Movies   "]);
        assert_eq!(line.spans[1].style, theme.text);

        let pie = vec![Trace::pie(labels(&["a"]), vec![1])];
        assert!(legend_line(&pie, &theme).is_none());
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 10), "short");
        assert_eq!(truncate_label("abcdefghij", 5), "abcd\u{2026}");
        assert_eq!(truncate_label("abcdefghij", 5).width(), 5);
    }

    #[test]
    fn test_share_of_total_prefers_precomputed() {
        let trace = Trace::pie(labels(&["a", "b"]), vec![1, 3]).with_percentages(vec![10.0, 90.0]);
        assert_eq!(share_of_total(&trace), vec![10.0, 90.0]);
        let trace = Trace::pie(labels(&["a", "b"]), vec![1, 3]);
        assert_eq!(share_of_total(&trace), vec![25.0, 75.0]);
    }
}
