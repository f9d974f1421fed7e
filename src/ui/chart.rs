//! Latency chart rendering.
//!
//! Genuine readings are drawn as a braille line in the series style.
//! Failures are drawn as scatter markers pinned to the bottom of the y-axis,
//! one marker kind per failure type, so they never masquerade as latencies.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_seconds;
use crate::data::{Measurement, Series};

/// Space reserved for y-axis labels when sizing the visible window.
const Y_LABEL_WIDTH: u16 = 10;

/// Smallest y-axis ceiling, in seconds.
const MIN_Y_MAX: f64 = 0.01;

/// Headroom above the largest visible reading.
const Y_HEADROOM: f64 = 1.2;

/// Points prepared for one frame of the chart.
#[derive(Debug, Default, PartialEq)]
pub struct ChartPoints {
    pub values: Vec<(f64, f64)>,
    pub execution_failures: Vec<(f64, f64)>,
    pub parse_failures: Vec<(f64, f64)>,
    /// Absolute index of the first and last visible sample.
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl ChartPoints {
    /// Lay out the most recent `width` samples of `series`.
    pub fn from_series(series: &Series, width: usize) -> Self {
        let width = width.max(2);
        let mut points = ChartPoints::default();
        let mut first = None;

        for (index, measurement) in series.window(width) {
            first.get_or_insert(index);
            let x = index as f64;
            match measurement {
                Measurement::Value(v) => points.values.push((x, v)),
                Measurement::ExecutionFailure => points.execution_failures.push((x, 0.0)),
                Measurement::ParseFailure => points.parse_failures.push((x, 0.0)),
            }
        }

        let start = first.unwrap_or(0) as f64;
        points.x_bounds = [start, start + (width - 1) as f64];

        let max = points.values.iter().map(|(_, v)| *v).fold(0.0, f64::max);
        points.y_bounds = [0.0, (max * Y_HEADROOM).max(MIN_Y_MAX)];
        points
    }
}

/// Render the bordered latency chart.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(
            app.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let series = app.series();
    if series.is_empty() {
        let waiting = Paragraph::new("Waiting for the first sample...")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(waiting, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2 + Y_LABEL_WIDTH) as usize;
    let points = ChartPoints::from_series(series, inner_width);

    let mut datasets = vec![Dataset::default()
        .name(app.frame.name.clone())
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.frame.style.color))
        .data(&points.values)];

    if !points.execution_failures.is_empty() {
        datasets.push(
            Dataset::default()
                .name("exec failed")
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(app.theme.measurement_style(Measurement::ExecutionFailure))
                .data(&points.execution_failures),
        );
    }
    if !points.parse_failures.is_empty() {
        datasets.push(
            Dataset::default()
                .name("bad output")
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(app.theme.measurement_style(Measurement::ParseFailure))
                .data(&points.parse_failures),
        );
    }

    let [x_min, x_max] = points.x_bounds;
    let [y_min, y_max] = points.y_bounds;
    let x_label = |v: f64| Line::styled(format!("{}", v as u64), Style::default().fg(app.theme.x_label));
    let y_label = |v: f64| Line::styled(format_seconds(v), Style::default().fg(app.theme.y_label));

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.axis))
                .bounds([x_min, x_max])
                .labels(vec![x_label(x_min), x_label(x_max)]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.axis))
                .bounds([y_min, y_max])
                .labels(vec![
                    y_label(y_min),
                    y_label((y_min + y_max) / 2.0),
                    y_label(y_max),
                ]),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{chart_channel, RenderSink, SeriesStyle};
    use crate::shutdown::Shutdown;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_points_split_by_outcome() {
        let mut series = Series::new();
        series.push(Measurement::Value(0.1));
        series.push(Measurement::ExecutionFailure);
        series.push(Measurement::Value(0.5));
        series.push(Measurement::ParseFailure);

        let points = ChartPoints::from_series(&series, 10);
        assert_eq!(points.values, vec![(0.0, 0.1), (2.0, 0.5)]);
        assert_eq!(points.execution_failures, vec![(1.0, 0.0)]);
        assert_eq!(points.parse_failures, vec![(3.0, 0.0)]);
        assert_eq!(points.x_bounds, [0.0, 9.0]);
        assert_eq!(points.y_bounds, [0.0, 0.6]);
    }

    #[test]
    fn test_points_scroll_with_window() {
        let mut series = Series::new();
        for i in 0..100 {
            series.push(Measurement::Value(i as f64 / 100.0));
        }
        let points = ChartPoints::from_series(&series, 20);
        assert_eq!(points.values.len(), 20);
        assert_eq!(points.values[0].0, 80.0);
        assert_eq!(points.x_bounds, [80.0, 99.0]);
    }

    #[test]
    fn test_all_failures_keep_a_usable_y_range() {
        let mut series = Series::new();
        for _ in 0..5 {
            series.push(Measurement::ExecutionFailure);
        }
        let points = ChartPoints::from_series(&series, 10);
        assert!(points.values.is_empty());
        assert_eq!(points.execution_failures.len(), 5);
        assert_eq!(points.y_bounds, [0.0, MIN_Y_MAX]);
    }

    #[test]
    fn test_render_shows_title_and_waiting_message() {
        let (_sink, chart) = chart_channel();
        let app = App::new(" example.com ", chart, Shutdown::new());

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|f| render(f, &app, f.area())).unwrap();

        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("example.com"));
        assert!(text.contains("Waiting for the first sample"));
    }

    #[test]
    fn test_render_with_samples() {
        let (mut sink, chart) = chart_channel();
        let mut app = App::new(" example.com ", chart, Shutdown::new());
        let mut series = Series::new();
        series.push(Measurement::Value(0.1));
        series.push(Measurement::ExecutionFailure);
        sink.push_series("time", &series, SeriesStyle::default()).unwrap();
        app.refresh();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &app, f.area())).unwrap();

        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("example.com"));
        assert!(text.contains("120.00ms"));
    }

    #[test]
    fn test_render_with_huge_reading() {
        let (mut sink, chart) = chart_channel();
        let mut app = App::new(" example.com ", chart, Shutdown::new());
        let mut series = Series::new();
        series.push(Measurement::parse("1e20\n"));
        sink.push_series("time", &series, SeriesStyle::default()).unwrap();
        app.refresh();

        let points = ChartPoints::from_series(app.series(), 10);
        assert_eq!(points.y_bounds, [0.0, 1e20 * Y_HEADROOM]);

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| render(f, &app, f.area())).unwrap();

        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        let top_label = format_seconds(points.y_bounds[1]);
        assert!(top_label.ends_with(".00s"));
        assert!(text.contains(&top_label));
    }
}
