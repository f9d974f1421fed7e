//! The producer loop: run the probe, classify, enqueue, sleep, repeat.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::channel::MeasurementSender;
use crate::data::Measurement;
use crate::probe::Probe;
use crate::shutdown::ShutdownSignal;

/// Paces probe execution at a fixed inter-cycle delay.
///
/// The delay is applied after every cycle, so the effective period is the
/// interval plus however long the probe took. Failed cycles are reported
/// like any other sample and are not retried.
#[derive(Debug)]
pub struct ProbeRunner<P> {
    probe: P,
    interval: Duration,
}

impl<P: Probe> ProbeRunner<P> {
    pub fn new(probe: P, interval: Duration) -> Self {
        Self { probe, interval }
    }

    /// Run until the shutdown signal fires or the consumer goes away.
    ///
    /// The probe invocation, the enqueue and the sleep all race the shutdown
    /// signal. Returns the number of measurements delivered to the channel.
    pub async fn run(self, tx: MeasurementSender, mut shutdown: ShutdownSignal) -> u64 {
        info!(
            probe = self.probe.description(),
            interval = ?self.interval,
            "Probe runner started"
        );

        let mut cycles = 0u64;
        loop {
            let measurement = tokio::select! {
                biased;
                _ = shutdown.triggered() => break,
                m = self.probe.measure() => m,
            };

            match measurement {
                Measurement::Value(v) => debug!(cycle = cycles, seconds = v, "Probe sample"),
                failure => warn!(cycle = cycles, outcome = failure.label(), "Probe failed"),
            }

            let sent = tokio::select! {
                biased;
                _ = shutdown.triggered() => break,
                sent = tx.send(measurement) => sent,
            };
            if sent.is_err() {
                debug!("Measurement channel closed, stopping probe runner");
                break;
            }
            cycles += 1;

            tokio::select! {
                biased;
                _ = shutdown.triggered() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!(cycles, "Probe runner stopped");
        cycles
    }
}
