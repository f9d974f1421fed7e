//! A single classified probe sample.

use serde::{Deserialize, Serialize};

/// Legacy numeric encoding of an execution failure.
pub const EXECUTION_FAILURE_SENTINEL: f64 = -1.0;

/// Legacy numeric encoding of a parse failure.
pub const PARSE_FAILURE_SENTINEL: f64 = -2.0;

/// The outcome of one probe cycle.
///
/// Every cycle produces exactly one `Measurement`, whether the probe
/// succeeded or not, so the series length always equals the number of
/// completed cycles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "seconds", rename_all = "snake_case")]
pub enum Measurement {
    /// Time-to-first-byte in seconds.
    Value(f64),
    /// The probe could not be launched, exited non-zero, or timed out.
    ExecutionFailure,
    /// The probe ran but its output was not a single non-negative number.
    ParseFailure,
}

impl Measurement {
    /// Classify the captured standard output of a successful probe run.
    ///
    /// The output must be exactly one floating-point token (surrounding
    /// whitespace, including the trailing newline, is ignored).
    pub fn parse(stdout: &str) -> Self {
        let mut tokens = stdout.split_whitespace();
        let (Some(token), None) = (tokens.next(), tokens.next()) else {
            return Measurement::ParseFailure;
        };

        match token.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Measurement::Value(v),
            _ => Measurement::ParseFailure,
        }
    }

    /// Classify a finished probe run from its exit status and stdout bytes.
    pub fn classify(success: bool, stdout: &[u8]) -> Self {
        if !success {
            return Measurement::ExecutionFailure;
        }
        match std::str::from_utf8(stdout) {
            Ok(text) => Self::parse(text),
            Err(_) => Measurement::ParseFailure,
        }
    }

    /// Returns the latency if this is a genuine reading.
    pub fn value(&self) -> Option<f64> {
        match self {
            Measurement::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns true for either failure kind.
    pub fn is_failure(&self) -> bool {
        !matches!(self, Measurement::Value(_))
    }

    /// Numeric encoding with negative sentinels for failures.
    pub fn sentinel_value(&self) -> f64 {
        match self {
            Measurement::Value(v) => *v,
            Measurement::ExecutionFailure => EXECUTION_FAILURE_SENTINEL,
            Measurement::ParseFailure => PARSE_FAILURE_SENTINEL,
        }
    }

    /// Short label used in the header and status lines.
    pub fn label(&self) -> &'static str {
        match self {
            Measurement::Value(_) => "ok",
            Measurement::ExecutionFailure => "exec failed",
            Measurement::ParseFailure => "bad output",
        }
    }
}
