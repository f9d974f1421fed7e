use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Suffix to nanoseconds multiplier (order matters: `ms` must be tried before `m` and `s`)
const UNITS: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("µs", 1_000.0),
    ("μs", 1_000.0),
    ("us", 1_000.0),
    ("ms", 1_000_000.0),
    ("s", 1_000_000_000.0),
    ("m", 60_000_000_000.0),
    ("h", 3_600_000_000_000.0),
];

/// Parse duration strings like "1s", "250ms", "1.5m", "16.958µs" or
/// compound forms such as "1m30s". A bare "0" is also accepted.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        bail!("Empty duration");
    }

    let mut rest = s;
    let mut nanos = 0.0;
    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (value, tail) = rest.split_at(digits);
        if value.is_empty() {
            bail!("Invalid duration value: {}", s);
        }
        let value: f64 = value
            .parse()
            .with_context(|| format!("Invalid duration value: {}", s))?;

        let Some((suffix, multiplier)) = UNITS.iter().find(|(suffix, _)| tail.starts_with(suffix))
        else {
            bail!("Unknown duration format: {} (expected a unit such as ms, s, m)", s);
        };
        nanos += value * multiplier;
        rest = &tail[suffix.len()..];
    }

    if !nanos.is_finite() {
        bail!("Duration out of range: {}", s);
    }
    Ok(Duration::from_nanos(nanos as u64))
}

/// Format a duration for display
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        "0ns".to_string()
    } else if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2}µs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

/// Format a latency in seconds, as reported by the probe
pub fn format_seconds(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "-".to_string();
    }
    match Duration::try_from_secs_f64(secs) {
        Ok(d) => format_duration(d),
        // Too large for a Duration
        Err(_) => format!("{:.2}s", secs),
    }
}
