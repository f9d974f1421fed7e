//! Application state for the chart view.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::data::{Measurement, Series};
use crate::sampler::{ChartFrame, ChartReceiver};
use crate::shutdown::Shutdown;
use crate::ui::Theme;

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
///
/// The app never touches the live series. It keeps the latest
/// [`ChartFrame`] pushed by the chart feeder and renders from that.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    /// Bordered chart title, derived from the probe command.
    pub title: String,
    /// Sampling interval and per-probe limit, for display.
    pub interval: Duration,
    pub max_duration: Duration,

    chart: ChartReceiver,
    pub frame: ChartFrame,
    pub last_update: Option<Instant>,
    pub sampling_stopped: bool,

    shutdown: Shutdown,
    export_path: PathBuf,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App rendering frames from `chart`.
    ///
    /// Quitting the app fires `shutdown`. Starts with the dark theme; use
    /// [`App::with_theme`] with [`Theme::auto_detect`] for a real terminal.
    pub fn new(title: &str, chart: ChartReceiver, shutdown: Shutdown) -> Self {
        Self {
            running: true,
            show_help: false,
            title: title.to_string(),
            interval: Duration::from_secs(1),
            max_duration: Duration::from_secs(3),
            chart,
            frame: ChartFrame::default(),
            last_update: None,
            sampling_stopped: false,
            shutdown,
            export_path: PathBuf::from("probewatch_export.json"),
            theme: Theme::dark(),
            status_message: None,
        }
    }

    /// Record the sampling parameters shown in the header.
    pub fn with_timing(mut self, interval: Duration, max_duration: Duration) -> Self {
        self.interval = interval;
        self.max_duration = max_duration;
        self
    }

    pub fn with_export_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_path = path.into();
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Pick up the latest frame from the chart feeder.
    ///
    /// Returns true if a new frame arrived.
    pub fn refresh(&mut self) -> bool {
        if let Some(frame) = self.chart.poll() {
            self.frame = frame;
            self.last_update = Some(Instant::now());
            return true;
        }

        if self.running && !self.sampling_stopped && self.chart.is_closed() {
            self.sampling_stopped = true;
            self.set_status_message("Sampling stopped".to_string());
        }
        false
    }

    pub fn series(&self) -> &Series {
        &self.frame.series
    }

    pub fn latest(&self) -> Option<Measurement> {
        self.frame.series.latest()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Stop the UI loop and cancel sampling.
    pub fn quit(&mut self) {
        self.running = false;
        self.shutdown.trigger();
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.is_triggered()
    }

    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    /// Export the samples currently held to a JSON file.
    ///
    /// Failures keep their legacy numeric encoding in `value` alongside the
    /// tagged outcome.
    pub fn export_series(&self, path: &Path) -> Result<()> {
        use std::io::Write;

        let series = self.series();
        if series.is_empty() {
            anyhow::bail!("No samples to export");
        }

        let (execution_failures, parse_failures) = series.failure_counts();
        let first = series.first_index();
        let samples: Vec<serde_json::Value> = series
            .iter()
            .enumerate()
            .map(|(i, m)| {
                serde_json::json!({
                    "index": first + i as u64,
                    "outcome": m,
                    "value": m.sentinel_value(),
                })
            })
            .collect();

        let export = serde_json::json!({
            "title": self.title.trim(),
            "series": self.frame.name,
            "interval_ms": self.interval.as_millis() as u64,
            "max_duration_ms": self.max_duration.as_millis() as u64,
            "summary": {
                "total": series.total(),
                "retained": series.len(),
                "execution_failures": execution_failures,
                "parse_failures": parse_failures,
            },
            "samples": samples,
        });

        let json = serde_json::to_string_pretty(&export)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }
}
