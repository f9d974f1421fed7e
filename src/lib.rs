//! # probewatch
//!
//! A terminal tool and library that repeatedly runs a user-defined HTTP
//! probe and charts the measured time to first byte as a live line graph.
//!
//! The probe is a `curl` command authored once (in an editor, from a file, or
//! derived from a bare domain). It is run at a fixed interval; each run yields
//! one [`Measurement`], which flows through a bounded channel into a chart
//! feeder and on to the terminal UI.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                           Application                            │
//! │  ┌─────────┐   ┌───────────┐  mpsc  ┌─────────────┐  watch  ┌────┐ │
//! │  │  probe  │──▶│ProbeRunner│───────▶│ ChartFeeder │────────▶│ ui │ │
//! │  │ (setup) │   │(producer) │        │ (consumer)  │         │    │ │
//! │  └─────────┘   └─────┬─────┘        └──────┬──────┘         └─┬──┘ │
//! │                      │                     │                  │    │
//! │                      └───── shutdown ◀─────┴──────────────────┘    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`probe`]**: Target resolution, editing, parsing, script rendering and
//!   the [`Probe`] trait with its shell implementation
//! - **[`sampler`]**: The producer/consumer pipeline and the [`RenderSink`] seam
//! - **[`data`]**: [`Measurement`] outcomes and the capped [`Series`]
//! - **[`shutdown`]**: One-shot cancellation shared by every task
//! - **[`ui`]**: Chart, header, status bar and help rendering with ratatui
//! - **[`config`]** and **[`logging`]**: Layered settings and file-based tracing
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Probe a domain every second, giving each request up to 3 seconds
//! probewatch 1s 3s example.com
//!
//! # Edit (or create) a probe definition file, then sample every 500ms
//! probewatch 500ms 2s probe.txt
//!
//! # Author a throwaway probe in $EDITOR
//! probewatch
//! ```
//!
//! ### Classifying probe output
//!
//! ```
//! use probewatch::Measurement;
//!
//! assert_eq!(Measurement::classify(true, b"0.153\n"), Measurement::Value(0.153));
//! assert_eq!(Measurement::classify(true, b"oops"), Measurement::ParseFailure);
//! assert_eq!(Measurement::classify(false, b""), Measurement::ExecutionFailure);
//! ```
//!
//! ### Running the pipeline as a library
//!
//! ```no_run
//! use std::time::Duration;
//! use probewatch::{
//!     chart_channel, measurement_channel, ChartFeeder, ProbeRunner, ProbeScript, ProbeSpec,
//!     ShellProbe, Shutdown,
//! };
//!
//! # tokio_test::block_on(async {
//! let spec = ProbeSpec::from_domain("example.com").unwrap();
//! let script = ProbeScript::write(&spec, Duration::from_secs(3)).unwrap();
//! let probe = ShellProbe::new(script.path(), Duration::from_secs(3));
//!
//! let shutdown = Shutdown::new();
//! let (tx, rx) = measurement_channel(100);
//! let (sink, mut chart) = chart_channel();
//!
//! let runner = ProbeRunner::new(probe, Duration::from_secs(1));
//! let feeder = ChartFeeder::new(Duration::from_millis(33), 10_000);
//! tokio::spawn(runner.run(tx, shutdown.signal()));
//! tokio::spawn(feeder.run(rx, sink, shutdown.signal()));
//!
//! tokio::time::sleep(Duration::from_secs(5)).await;
//! if let Some(frame) = chart.poll() {
//!     println!("{} samples", frame.series.len());
//! }
//! shutdown.trigger();
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod logging;
pub mod probe;
pub mod sampler;
pub mod shutdown;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::Settings;
pub use data::{Measurement, Series};
pub use probe::{Editor, Probe, ProbeError, ProbeScript, ProbeSpec, ProbeTarget, ShellProbe};
pub use sampler::{
    chart_channel, measurement_channel, ChartFeeder, ChartFrame, ChartReceiver, ChartSink,
    MeasurementReceiver, MeasurementSender, ProbeRunner, RenderSink, SeriesStyle,
};
pub use shutdown::{Shutdown, ShutdownSignal};
