//! Terminal rendering.

pub mod chart;
pub mod common;
pub mod theme;

pub use theme::Theme;
