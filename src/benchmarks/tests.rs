//! Benchmark module tests
//!
//! These share the global store with every other test in the crate, so assertions only look at
//! section names unique to each test.

use super::*;
use std::thread;
use std::time::{Duration, Instant};

fn enabled() -> BenchmarkConfig {
    BenchmarkConfig {
        enabled: true,
        trace_sections: false,
        min_duration_threshold: Duration::ZERO,
        max_frame_samples: 100,
    }
}

/// Tests profiler section timing
#[test]
fn test_profiler_records_section() {
    let mut profiler = Profiler::new(enabled());
    profiler.start_section("bench_test_section");
    thread::sleep(Duration::from_millis(2));
    profiler.end_section("bench_test_section");

    let measurements = get_measurements();
    let metrics = &measurements["bench_test_section"];
    assert!(metrics.count >= 1);
    assert!(metrics.max_duration >= Duration::from_millis(2));
}

/// A disabled profiler records nothing.
#[test]
fn test_disabled_profiler_is_silent() {
    let config = BenchmarkConfig {
        enabled: false,
        ..enabled()
    };
    let mut profiler = Profiler::new(config);
    profiler.start_section("bench_disabled_section");
    profiler.end_section("bench_disabled_section");
    assert!(!get_measurements().contains_key("bench_disabled_section"));
}

/// Ending a section that never started is ignored.
#[test]
fn test_unmatched_end_is_ignored() {
    let mut profiler = Profiler::new(enabled());
    profiler.end_section("bench_never_started");
    assert!(!get_measurements().contains_key("bench_never_started"));
}

/// Tests frame rate counter with evenly spaced frames
#[test]
fn test_frame_rate_counter() {
    let mut counter = FrameRateCounter::new(3);
    let t0 = Instant::now();
    assert_eq!(counter.record_frame_at(t0), 0.0);
    for i in 1..=5 {
        counter.record_frame_at(t0 + Duration::from_millis(20 * i));
    }
    assert_eq!(counter.frame_times.len(), 3);
    assert!((counter.get_fps() - 50.0).abs() < 1e-6);
    assert_eq!(counter.get_min_frame_time(), Duration::from_millis(20));
}

/// The summary table lists recorded sections.
#[test]
fn test_summary_mentions_sections() {
    let mut profiler = Profiler::new(enabled());
    profiler.start_section("bench_summary_section");
    profiler.end_section("bench_summary_section");
    let report = summary_report().unwrap_or_default();
    assert!(report.contains("bench_summary_section"));
    assert!(report.contains("FRAME BUDGET"));
}
