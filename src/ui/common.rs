//! Common UI components around the chart.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::duration::{format_duration, format_seconds};
use crate::data::Measurement;

/// Render the header bar.
///
/// Displays: latest reading, sample count, failure counts, sampling timing.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let series = app.series();
    let (exec_failures, parse_failures) = series.failure_counts();

    let (latest_text, latest_style) = match app.latest() {
        Some(m @ Measurement::Value(v)) => (format_seconds(v), app.theme.measurement_style(m)),
        Some(m) => (m.label().to_string(), app.theme.measurement_style(m)),
        None => (
            "waiting".to_string(),
            Style::default().add_modifier(Modifier::DIM),
        ),
    };

    let status_style = if app.sampling_stopped {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        latest_style
    };

    let failure_span = |count: u64, style: Style| {
        if count > 0 {
            Span::styled(count.to_string(), style)
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        }
    };

    let line = Line::from(vec![
        Span::styled(" ● ", status_style),
        Span::styled("PROBEWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(app.title.trim().to_string(), Style::default().fg(app.theme.highlight)),
        Span::raw(" │ "),
        Span::styled(latest_text, latest_style),
        Span::raw(" │ "),
        Span::styled(
            series.total().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" samples │ "),
        failure_span(
            exec_failures,
            app.theme.measurement_style(Measurement::ExecutionFailure),
        ),
        Span::raw(" exec "),
        failure_span(
            parse_failures,
            app.theme.measurement_style(Measurement::ParseFailure),
        ),
        Span::raw(" parse │ "),
        Span::raw(format!(
            "every {} max {}",
            format_duration(app.interval),
            format_duration(app.max_duration)
        )),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows time since the last chart frame and the available controls.
/// Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = "e:export ?:help q:quit";
    let status = match app.last_update {
        Some(_) if app.sampling_stopped => format!(" Sampling stopped | {}", controls),
        Some(at) => format!(
            " Updated {:.1}s ago | {}",
            at.elapsed().as_secs_f64(),
            controls
        ),
        None => format!(" Waiting for samples... | {}", controls),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts and the chart legend.
///
/// Displayed as a centered modal on top of the chart.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from("  e           Export samples to JSON"),
        Line::from("  ?           Toggle this help"),
        Line::from("  q / Ctrl+C  Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Legend",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled("  ⣿ ", Style::default().fg(app.frame.style.color)),
            Span::raw("seconds to first byte"),
        ]),
        Line::from(vec![
            Span::styled(
                "  █ ",
                app.theme.measurement_style(Measurement::ExecutionFailure),
            ),
            Span::raw("probe failed to run"),
        ]),
        Line::from(vec![
            Span::styled("  • ", app.theme.measurement_style(Measurement::ParseFailure)),
            Span::raw("unparseable output"),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 15u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Series;
    use crate::sampler::{chart_channel, RenderSink, SeriesStyle};
    use crate::shutdown::Shutdown;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App, width: u16, height: u16, draw: fn(&mut Frame, &App, Rect)) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_header_counts_failures() {
        let (mut sink, chart) = chart_channel();
        let mut app = App::new(" example.com ", chart, Shutdown::new());
        let mut series = Series::new();
        series.push(Measurement::Value(0.1));
        series.push(Measurement::ExecutionFailure);
        series.push(Measurement::ExecutionFailure);
        series.push(Measurement::ParseFailure);
        sink.push_series("time", &series, SeriesStyle::default()).unwrap();
        app.refresh();

        let text = screen(&app, 120, 1, render_header);
        assert!(text.contains("PROBEWATCH"));
        assert!(text.contains("example.com"));
        assert!(text.contains("bad output"));
        assert!(text.contains("4 samples"));
        assert!(text.contains("2 exec"));
        assert!(text.contains("1 parse"));
    }

    #[test]
    fn test_header_with_huge_reading() {
        let (mut sink, chart) = chart_channel();
        let mut app = App::new(" example.com ", chart, Shutdown::new());
        let mut series = Series::new();
        series.push(Measurement::parse("1e20\n"));
        sink.push_series("time", &series, SeriesStyle::default()).unwrap();
        app.refresh();

        let text = screen(&app, 160, 1, render_header);
        assert!(text.contains("100000000000000000000.00s"));
    }

    #[test]
    fn test_status_bar_before_first_frame() {
        let (_sink, chart) = chart_channel();
        let app = App::new(" example.com ", chart, Shutdown::new());
        let text = screen(&app, 80, 1, render_status_bar);
        assert!(text.contains("Waiting for samples"));
        assert!(text.contains("q:quit"));
    }

    #[test]
    fn test_status_message_takes_precedence() {
        let (_sink, chart) = chart_channel();
        let mut app = App::new(" example.com ", chart, Shutdown::new());
        app.set_status_message("Exported to out.json".to_string());
        let text = screen(&app, 80, 1, render_status_bar);
        assert!(text.contains("Exported to out.json"));
    }

    #[test]
    fn test_help_lists_keys() {
        let (_sink, chart) = chart_channel();
        let app = App::new(" example.com ", chart, Shutdown::new());
        let text = screen(&app, 80, 24, render_help);
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("Export samples to JSON"));
    }
}
