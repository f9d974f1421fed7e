//! The consumer loop: pull one measurement per tick and push the series.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::channel::MeasurementReceiver;
use super::sink::{RenderSink, SeriesStyle, SERIES_NAME};
use crate::data::Series;
use crate::shutdown::ShutdownSignal;

/// Shortest allowed tick.
const MIN_CADENCE: Duration = Duration::from_millis(1);

/// Moves measurements from the channel into the series on a fixed cadence.
///
/// The feeder is the only owner of the [`Series`]; the renderer only ever
/// sees copies pushed through the [`RenderSink`].
#[derive(Debug)]
pub struct ChartFeeder {
    cadence: Duration,
    series: Series,
    style: SeriesStyle,
}

impl ChartFeeder {
    /// Create a feeder ticking every `cadence` that keeps at most
    /// `history_limit` samples (`0` for unbounded).
    ///
    /// A zero cadence is treated as one millisecond.
    pub fn new(cadence: Duration, history_limit: usize) -> Self {
        Self {
            cadence: cadence.max(MIN_CADENCE),
            series: Series::with_limit(history_limit),
            style: SeriesStyle::default(),
        }
    }

    pub fn with_style(mut self, style: SeriesStyle) -> Self {
        self.style = style;
        self
    }

    /// Run until shutdown, until the producer is gone, or until the sink is
    /// closed. Returns the final series.
    ///
    /// Each tick waits for exactly one measurement. Both the tick wait and the
    /// receive race the shutdown signal, so nothing is appended after it fires.
    pub async fn run<S: RenderSink>(
        mut self,
        mut rx: MeasurementReceiver,
        mut sink: S,
        mut shutdown: ShutdownSignal,
    ) -> Series {
        info!(cadence = ?self.cadence, "Chart feeder started");

        let mut ticker = tokio::time::interval(self.cadence);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.triggered() => break,
                _ = ticker.tick() => {}
            }

            let measurement = tokio::select! {
                biased;
                _ = shutdown.triggered() => break,
                m = rx.recv() => m,
            };
            let Some(measurement) = measurement else {
                debug!("Measurement channel closed, stopping chart feeder");
                break;
            };

            self.series.push(measurement);
            if sink.push_series(SERIES_NAME, &self.series, self.style).is_err() {
                debug!("Render sink closed, stopping chart feeder");
                break;
            }
        }

        info!(samples = self.series.total(), "Chart feeder stopped");
        self.series
    }
}
