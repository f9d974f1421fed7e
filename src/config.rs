//! Runtime settings.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `PROBEWATCH_*` environment variables. Command-line arguments are applied
//! on top by the binary.
//!
//! ```toml
//! # probewatch.toml
//! render_cadence_ms = 33
//! redraw_interval_ms = 100
//! channel_capacity = 100
//! history_limit = 10000
//! shell = "bash"
//! editor = "vim"
//! log_file = "/tmp/probewatch.log"
//! log_filter = "probewatch=debug"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::data::DEFAULT_HISTORY_LIMIT;
use crate::probe::DEFAULT_SHELL;
use crate::sampler::DEFAULT_CAPACITY;

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "probewatch.toml";

/// Prefix for environment overrides, e.g. `PROBEWATCH_CHANNEL_CAPACITY=50`.
pub const ENV_PREFIX: &str = "PROBEWATCH";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Chart feeder cadence (R).
    pub render_cadence_ms: u64,
    /// Terminal redraw and input poll interval.
    pub redraw_interval_ms: u64,
    /// Measurement channel capacity (C).
    pub channel_capacity: usize,
    /// Samples kept for the chart, `0` for unbounded.
    pub history_limit: usize,
    /// Shell used to run the probe script.
    pub shell: String,
    /// Editor command for authoring the probe.
    pub editor: Option<String>,
    /// Log destination. Logging is off when unset.
    pub log_file: Option<PathBuf>,
    /// `tracing` filter directives, overridden by `RUST_LOG`.
    pub log_filter: String,
    /// Where the `e` key writes the series.
    pub export_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            render_cadence_ms: 33,
            redraw_interval_ms: 100,
            channel_capacity: DEFAULT_CAPACITY,
            history_limit: DEFAULT_HISTORY_LIMIT,
            shell: DEFAULT_SHELL.to_string(),
            editor: None,
            log_file: None,
            log_filter: "info".to_string(),
            export_path: PathBuf::from("probewatch_export.json"),
        }
    }
}

impl Settings {
    /// Load settings from `path` (required) or from `probewatch.toml` in the
    /// working directory (optional), plus environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };
        Self::build(file, Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn build(file: File<config::FileSourceFile, FileFormat>, env: Environment) -> Result<Self> {
        let defaults = Self::default();

        let config = Config::builder()
            .set_default("render_cadence_ms", defaults.render_cadence_ms)?
            .set_default("redraw_interval_ms", defaults.redraw_interval_ms)?
            .set_default("channel_capacity", defaults.channel_capacity as u64)?
            .set_default("history_limit", defaults.history_limit as u64)?
            .set_default("shell", defaults.shell)?
            .set_default("log_filter", defaults.log_filter)?
            .set_default("export_path", defaults.export_path.to_string_lossy().to_string())?
            .add_source(file)
            .add_source(env)
            .build()
            .context("Failed to load settings")?;

        config.try_deserialize().context("Invalid settings")
    }

    pub fn render_cadence(&self) -> Duration {
        Duration::from_millis(self.render_cadence_ms.max(1))
    }

    pub fn redraw_interval(&self) -> Duration {
        Duration::from_millis(self.redraw_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env() -> Environment {
        Environment::with_prefix("PROBEWATCH_TEST_UNSET_PREFIX")
    }

    fn optional_missing() -> File<config::FileSourceFile, FileFormat> {
        File::new("/nonexistent/probewatch", FileFormat::Toml).required(false)
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::build(optional_missing(), no_env()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.render_cadence(), Duration::from_millis(33));
        assert_eq!(settings.redraw_interval(), Duration::from_millis(100));
        assert_eq!(settings.channel_capacity, 100);
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "channel_capacity = 5").unwrap();
        writeln!(file, "history_limit = 0").unwrap();
        writeln!(file, "editor = \"vim\"").unwrap();
        writeln!(file, "log_file = \"/tmp/probewatch.log\"").unwrap();
        file.flush().unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.channel_capacity, 5);
        assert_eq!(settings.history_limit, 0);
        assert_eq!(settings.editor.as_deref(), Some("vim"));
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/probewatch.log")));
        assert_eq!(settings.render_cadence_ms, 33);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "channel_capacity = 5").unwrap();
        file.flush().unwrap();

        let env = Environment::with_prefix("PROBEWATCH").try_parsing(true).source(Some(
            [("PROBEWATCH_CHANNEL_CAPACITY".to_string(), "7".to_string())]
                .into_iter()
                .collect(),
        ));
        let settings = Settings::build(File::from(file.path()), env).unwrap();
        assert_eq!(settings.channel_capacity, 7);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/probewatch.toml"))).is_err());
    }

    #[test]
    fn test_invalid_value_is_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "channel_capacity = \"lots\"").unwrap();
        file.flush().unwrap();
        assert!(Settings::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_zero_cadence_is_clamped() {
        let settings = Settings {
            render_cadence_ms: 0,
            ..Settings::default()
        };
        assert_eq!(settings.render_cadence(), Duration::from_millis(1));
    }
}
