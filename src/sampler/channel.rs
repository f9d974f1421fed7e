//! Bounded FIFO handoff between the probe runner and the chart feeder.
//!
//! A full channel blocks the producer (backpressure) and an empty one blocks
//! the consumer. Nothing is ever dropped or reordered.

use tokio::sync::mpsc;

use crate::data::Measurement;

/// Default number of measurements that can be queued.
pub const DEFAULT_CAPACITY: usize = 100;

/// Producer half, owned by the probe runner.
#[derive(Debug)]
pub struct MeasurementSender {
    tx: mpsc::Sender<Measurement>,
}

/// Consumer half, owned by the chart feeder.
#[derive(Debug)]
pub struct MeasurementReceiver {
    rx: mpsc::Receiver<Measurement>,
}

/// The other half of the channel has gone away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("measurement channel closed")]
pub struct ChannelClosed;

/// Create a channel pair holding at most `capacity` measurements.
///
/// A capacity of zero is treated as one.
pub fn measurement_channel(capacity: usize) -> (MeasurementSender, MeasurementReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (MeasurementSender { tx }, MeasurementReceiver { rx })
}

impl MeasurementSender {
    /// Enqueue a measurement, waiting while the channel is full.
    pub async fn send(&self, measurement: Measurement) -> Result<(), ChannelClosed> {
        self.tx.send(measurement).await.map_err(|_| ChannelClosed)
    }

    /// Number of measurements currently queued.
    pub fn queued(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }
}

impl MeasurementReceiver {
    /// Dequeue the oldest measurement, waiting while the channel is empty.
    ///
    /// Returns `None` once the sender is gone and the queue is drained.
    pub async fn recv(&mut self) -> Option<Measurement> {
        self.rx.recv().await
    }

    /// Dequeue without waiting.
    pub fn try_recv(&mut self) -> Option<Measurement> {
        self.rx.try_recv().ok()
    }
}
