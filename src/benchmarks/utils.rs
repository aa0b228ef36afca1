//! Benchmark utility functions
//!
//! Thin wrappers over the global [`BENCHMARK_DATA`] store so callers never handle the lock.

use std::collections::HashMap;

use chrono::Local;
use tracing::info;

use super::data::{BENCHMARK_DATA, PerformanceMetrics};
use super::format::format_table;

/// Records a frame boundary and returns the rolling FPS.
pub fn record_frame() -> f64 {
    BENCHMARK_DATA
        .lock()
        .map(|mut data| data.record_frame())
        .unwrap_or(0.0)
}

/// Returns a copy of all recorded section metrics.
pub fn get_measurements() -> HashMap<String, PerformanceMetrics> {
    BENCHMARK_DATA
        .lock()
        .map(|data| data.get_measurements())
        .unwrap_or_default()
}

/// Returns `(min, avg, max)` FPS over the sample window.
pub fn get_fps_stats() -> (f64, f64, f64) {
    BENCHMARK_DATA
        .lock()
        .map(|data| data.get_fps_stats())
        .unwrap_or((0.0, 0.0, 0.0))
}

/// Builds the summary table, or `None` when nothing was recorded.
pub fn summary_report() -> Option<String> {
    let measurements = get_measurements();
    if measurements.is_empty() {
        return None;
    }
    let mut rows: Vec<_> = measurements.iter().collect();
    Some(format_table(&mut rows, get_fps_stats(), Local::now()))
}

/// Logs the summary table at info level.
pub fn log_summary() {
    match summary_report() {
        Some(report) => info!("frame budget summary\n{report}"),
        None => info!("no frame budget measurements recorded"),
    }
}
