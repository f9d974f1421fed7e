//! The render sink seam between the chart feeder and the terminal UI.
//!
//! The feeder pushes the whole updated series on every tick. The UI side
//! holds a [`ChartReceiver`] and picks up the latest frame whenever it
//! redraws, so it never blocks the feeder and never sees a half-written series.

use ratatui::style::Color;
use tokio::sync::watch;

use crate::data::Series;

/// Name given to the single latency series.
pub const SERIES_NAME: &str = "time";

/// Visual style applied to a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesStyle {
    /// Line colour for genuine readings.
    pub color: Color,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            color: Color::Indexed(33),
        }
    }
}

/// One update handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartFrame {
    pub name: String,
    pub series: Series,
    pub style: SeriesStyle,
}

/// The renderer has gone away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("render sink closed")]
pub struct SinkClosed;

/// Accepts a named series with a style and renders it on its own schedule.
pub trait RenderSink: Send {
    fn push_series(
        &mut self,
        name: &str,
        series: &Series,
        style: SeriesStyle,
    ) -> Result<(), SinkClosed>;
}

/// A [`RenderSink`] backed by a watch channel.
#[derive(Debug)]
pub struct ChartSink {
    tx: watch::Sender<ChartFrame>,
}

/// UI side of a [`ChartSink`].
#[derive(Debug, Clone)]
pub struct ChartReceiver {
    rx: watch::Receiver<ChartFrame>,
}

/// Create a connected sink/receiver pair, starting from an empty frame.
pub fn chart_channel() -> (ChartSink, ChartReceiver) {
    let (tx, rx) = watch::channel(ChartFrame::default());
    (ChartSink { tx }, ChartReceiver { rx })
}

impl RenderSink for ChartSink {
    fn push_series(
        &mut self,
        name: &str,
        series: &Series,
        style: SeriesStyle,
    ) -> Result<(), SinkClosed> {
        if self.tx.is_closed() {
            return Err(SinkClosed);
        }
        self.tx.send_modify(|frame| {
            if frame.name != name {
                frame.name = name.to_string();
            }
            frame.series.clone_from(series);
            frame.style = style;
        });
        Ok(())
    }
}

impl ChartReceiver {
    /// Take the latest frame if it changed since the last call.
    ///
    /// The final frame is still delivered after the sink has been dropped.
    pub fn poll(&mut self) -> Option<ChartFrame> {
        let frame = self.rx.borrow_and_update();
        frame.has_changed().then(|| ChartFrame::clone(&frame))
    }

    /// Returns true once the feeder side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.rx.has_changed().is_err()
    }
}
