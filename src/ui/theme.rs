//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::Measurement;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for genuine readings in the header.
    pub healthy: Color,
    /// Color for parse failures.
    pub warning: Color,
    /// Color for execution failures.
    pub critical: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Chart axis lines.
    pub axis: Color,
    /// Chart x-axis labels.
    pub x_label: Color,
    /// Chart y-axis labels.
    pub y_label: Color,
    /// Style for headings in overlays.
    pub header: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            healthy: Color::Green,
            warning: Color::Yellow,
            critical: Color::Red,
            border: Color::Gray,
            axis: Color::Red,
            x_label: Color::Cyan,
            y_label: Color::Green,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            border_type: BorderType::Plain,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            healthy: Color::Green,
            warning: Color::Yellow,
            critical: Color::Red,
            border: Color::DarkGray,
            axis: Color::Red,
            x_label: Color::Blue,
            y_label: Color::Green,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Plain,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a measurement outcome
    pub fn measurement_style(&self, measurement: Measurement) -> Style {
        match measurement {
            Measurement::Value(_) => Style::default().fg(self.healthy),
            Measurement::ParseFailure => Style::default().fg(self.warning),
            Measurement::ExecutionFailure => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
        }
    }
}
