//! Frame-budget profiling.
//!
//! This module measures where each frame's time goes. The game loop times its physics, pickup,
//! animation and render sections with a [`Profiler`] and the windowing layer times input
//! decoding and records frame boundaries. A summary table is logged when the game exits.
//!
//! # Features
//! - **Section Timing**: named start/end sections accumulated into [`PerformanceMetrics`]
//! - **Frame Rate**: rolling FPS window in [`FrameRateCounter`]
//! - **Reporting**: a timestamped table via [`log_summary`]
//! - **Conditional Compilation**: enabled in debug builds only by default

use std::time::Duration;

/// Configuration for benchmarking features
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Whether benchmarking is enabled
    pub enabled: bool,
    /// Whether to emit a trace event for every finished section
    pub trace_sections: bool,
    /// Sections shorter than this are not recorded
    pub min_duration_threshold: Duration,
    /// Number of frame samples kept for FPS statistics
    pub max_frame_samples: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            enabled: cfg!(debug_assertions),
            trace_sections: false,
            min_duration_threshold: Duration::ZERO,
            max_frame_samples: 1000,
        }
    }
}

/// Data structures for storing benchmark measurements
///
/// Frame rate counter, section profiler, per-section metrics and the global store.
pub mod data;

/// Formatting of benchmark results into a readable table.
pub mod format;

/// Convenience functions over the global store.
pub mod utils;

#[cfg(test)]
mod tests;

pub use data::{FrameRateCounter, PerformanceMetrics, Profiler};
pub use utils::*;
