//! Data models for probe samples.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "1s", "500ms")
//! - [`measurement`]: The tagged result of one probe cycle ([`Measurement`])
//! - [`series`]: Ordered, optionally capped sample history ([`Series`])
//!
//! ## Data Flow
//!
//! ```text
//! probe stdout / exit status
//!        │
//!        ▼
//! Measurement::classify()
//!        │
//!        ▼
//! Series::push() ──▶ Series::window() (for the chart)
//! ```

pub mod duration;
pub mod measurement;
pub mod series;

pub use measurement::Measurement;
pub use series::{Series, DEFAULT_HISTORY_LIMIT};
