//! CLI library components for the quality indicator tracker.

pub mod logging;
