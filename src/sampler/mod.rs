//! The concurrent sampling pipeline.
//!
//! ```text
//! ┌──────────────┐   bounded mpsc   ┌─────────────┐   watch   ┌──────────┐
//! │ ProbeRunner  │ ───────────────▶ │ ChartFeeder │ ────────▶ │ UI (App) │
//! │ (interval I) │   Measurement    │ (cadence R) │  Series   │ (redraw) │
//! └──────┬───────┘                  └──────┬──────┘           └────┬─────┘
//!        │                                 │                       │
//!        └────────── ShutdownSignal ◀──────┴────── Shutdown ◀──────┘
//! ```
//!
//! - [`channel`]: bounded FIFO between producer and consumer
//! - [`runner`]: producer loop that runs the [`Probe`](crate::probe::Probe)
//! - [`feeder`]: consumer loop that owns the [`Series`](crate::data::Series)
//! - [`sink`]: the [`RenderSink`] seam and its watch-channel implementation

pub mod channel;
pub mod feeder;
pub mod runner;
pub mod sink;

pub use channel::{measurement_channel, MeasurementReceiver, MeasurementSender, DEFAULT_CAPACITY};
pub use feeder::ChartFeeder;
pub use runner::ProbeRunner;
pub use sink::{chart_channel, ChartFrame, ChartReceiver, ChartSink, RenderSink, SeriesStyle};
