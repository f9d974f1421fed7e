//! End-to-end sampling through runner, channel, feeder and chart sink.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use probewatch::{
    chart_channel, measurement_channel, ChartFeeder, ChartReceiver, Measurement, Probe,
    ProbeRunner, Series, Shutdown,
};

/// Poll the chart until it holds at least `samples` samples.
async fn wait_for_samples(chart: &mut ChartReceiver, samples: u64) -> Series {
    let mut latest = Series::new();
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    while latest.total() < samples {
        assert!(
            tokio::time::Instant::now() < deadline,
            "only {} samples arrived",
            latest.total()
        );
        if let Some(frame) = chart.poll() {
            latest = frame.series;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    latest
}

#[cfg(unix)]
mod shell {
    use super::*;
    use probewatch::ShellProbe;
    use std::io::Write;

    fn echo_script(dir: &tempfile::TempDir, output: &str) -> std::path::PathBuf {
        let path = dir.path().join("probe.sh");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "echo {}", output).unwrap();
        path
    }

    #[tokio::test]
    async fn test_constant_probe_charts_constant_line() {
        let dir = tempfile::tempdir().unwrap();
        let probe = ShellProbe::new(echo_script(&dir, "0.100"), Duration::from_secs(3));

        let shutdown = Shutdown::new();
        let (tx, rx) = measurement_channel(100);
        let (sink, mut chart) = chart_channel();

        let runner = tokio::spawn(
            ProbeRunner::new(probe, Duration::from_millis(10)).run(tx, shutdown.signal()),
        );
        let feeder = tokio::spawn(
            ChartFeeder::new(Duration::from_millis(5), 0).run(rx, sink, shutdown.signal()),
        );

        let seen = wait_for_samples(&mut chart, 5).await;
        assert!(seen.iter().all(|m| *m == Measurement::Value(0.100)));

        shutdown.trigger();
        let cycles = runner.await.unwrap();
        let series = feeder.await.unwrap();

        assert!(series.total() >= 5);
        assert!(series.total() <= cycles);
        assert!(series.iter().all(|m| *m == Measurement::Value(0.100)));
    }

    #[tokio::test]
    async fn test_missing_binary_charts_only_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.sh");
        std::fs::write(&path, "/nonexistent/bin/curl --silent example.com\n").unwrap();
        let probe = ShellProbe::new(&path, Duration::from_secs(3));

        let shutdown = Shutdown::new();
        let (tx, rx) = measurement_channel(100);
        let (sink, mut chart) = chart_channel();

        let runner = tokio::spawn(
            ProbeRunner::new(probe, Duration::from_millis(10)).run(tx, shutdown.signal()),
        );
        let feeder = tokio::spawn(
            ChartFeeder::new(Duration::from_millis(5), 0).run(rx, sink, shutdown.signal()),
        );

        wait_for_samples(&mut chart, 3).await;
        shutdown.trigger();
        runner.await.unwrap();
        let series = feeder.await.unwrap();

        assert!(series.total() >= 3);
        assert!(series.iter().all(|m| *m == Measurement::ExecutionFailure));
        assert_eq!(series.failure_counts(), (series.total(), 0));
    }
}

/// Returns 0, 1, 2, ... as latencies. Once `limit` samples have been
/// produced, further calls never complete.
#[derive(Clone, Default)]
struct SequenceProbe {
    calls: Arc<AtomicU64>,
    limit: Option<u64>,
}

#[async_trait]
impl Probe for SequenceProbe {
    async fn measure(&self) -> Measurement {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.limit.is_some_and(|limit| n >= limit) {
            std::future::pending::<()>().await;
        }
        Measurement::Value(n as f64)
    }

    fn description(&self) -> &str {
        "sequence"
    }
}

#[tokio::test(start_paused = true)]
async fn test_every_cycle_arrives_in_order() {
    const CYCLES: u64 = 25;

    // Separate controllers so the feeder outlives the runner and drains
    let producer_stop = Shutdown::new();
    let consumer_stop = Shutdown::new();
    let (tx, rx) = measurement_channel(100);
    let (sink, mut chart) = chart_channel();

    let probe = SequenceProbe {
        limit: Some(CYCLES),
        ..SequenceProbe::default()
    };
    let runner = tokio::spawn(
        ProbeRunner::new(probe, Duration::from_millis(10)).run(tx, producer_stop.signal()),
    );
    // Slower than the runner, so most samples are still queued when it stops
    let feeder = tokio::spawn(
        ChartFeeder::new(Duration::from_millis(100), 0).run(rx, sink, consumer_stop.signal()),
    );

    tokio::time::sleep(Duration::from_secs(1)).await;
    producer_stop.trigger();
    let cycles = runner.await.unwrap();
    assert_eq!(cycles, CYCLES);

    // The runner dropped its sender; the feeder drains the queue and stops
    let series = tokio::time::timeout(Duration::from_secs(10), feeder)
        .await
        .expect("feeder stops once the queue is drained")
        .unwrap();
    assert!(!consumer_stop.is_triggered());

    assert_eq!(series.total(), cycles);
    assert_eq!(series.len() as u64, CYCLES);
    let values: Vec<f64> = series.iter().filter_map(Measurement::value).collect();
    let expected: Vec<f64> = (0..CYCLES).map(|i| i as f64).collect();
    assert_eq!(values, expected);

    let last_frame = chart.poll().map(|frame| frame.series);
    assert_eq!(last_frame.as_ref().map(Series::total), Some(CYCLES));
}

#[tokio::test(start_paused = true)]
async fn test_stalled_consumer_blocks_producer_at_capacity() {
    let shutdown = Shutdown::new();
    let (tx, mut rx) = measurement_channel(3);

    let probe = SequenceProbe::default();
    let runner = tokio::spawn(
        ProbeRunner::new(probe.clone(), Duration::from_millis(10)).run(tx, shutdown.signal()),
    );

    tokio::time::sleep(Duration::from_secs(5)).await;

    // Three queued plus one measured and waiting to be sent
    assert_eq!(probe.calls.load(Ordering::SeqCst), 4);
    assert!(!runner.is_finished());

    // Draining one slot lets exactly one more cycle through
    assert_eq!(rx.try_recv(), Some(Measurement::Value(0.0)));
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(probe.calls.load(Ordering::SeqCst), 5);

    shutdown.trigger();
    assert_eq!(runner.await.unwrap(), 4);
}
