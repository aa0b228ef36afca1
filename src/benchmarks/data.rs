use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::trace;

use super::BenchmarkConfig;

/// Frame rate counter for monitoring rendering performance
pub struct FrameRateCounter {
    /// Durations of the most recent frames
    pub frame_times: VecDeque<Duration>,
    /// Maximum number of frame time samples to keep in memory
    max_samples: usize,
    /// Timestamp of the last recorded frame
    last_frame_time: Option<Instant>,
}

impl FrameRateCounter {
    /// Creates a new frame rate counter
    pub fn new(max_samples: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples,
            last_frame_time: None,
        }
    }

    /// Records a frame boundary and returns the current FPS
    pub fn record_frame(&mut self) -> f64 {
        self.record_frame_at(Instant::now())
    }

    /// Records a frame boundary at `now`
    pub fn record_frame_at(&mut self, now: Instant) -> f64 {
        if let Some(last_time) = self.last_frame_time {
            self.frame_times.push_back(now.duration_since(last_time));
            while self.frame_times.len() > self.max_samples {
                self.frame_times.pop_front();
            }
        }
        self.last_frame_time = Some(now);
        self.get_fps()
    }

    /// Gets the current average FPS
    pub fn get_fps(&self) -> f64 {
        if self.frame_times.is_empty() {
            return 0.0;
        }

        let total_time: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total_time.as_secs_f64() / self.frame_times.len() as f64;

        if avg_frame_time > 0.0 {
            1.0 / avg_frame_time
        } else {
            0.0
        }
    }

    /// Gets the minimum frame time (best performance)
    pub fn get_min_frame_time(&self) -> Duration {
        self.frame_times
            .iter()
            .min()
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Gets the maximum frame time (worst performance)
    pub fn get_max_frame_time(&self) -> Duration {
        self.frame_times
            .iter()
            .max()
            .copied()
            .unwrap_or(Duration::ZERO)
    }
}

/// Times named sections of a frame
pub struct Profiler {
    active_timers: HashMap<&'static str, Instant>,
    config: BenchmarkConfig,
}

impl Profiler {
    /// Creates a new profiler
    pub fn new(config: BenchmarkConfig) -> Self {
        Self {
            active_timers: HashMap::new(),
            config,
        }
    }

    /// Starts timing a section
    pub fn start_section(&mut self, name: &'static str) {
        if self.config.enabled {
            self.active_timers.insert(name, Instant::now());
        }
    }

    /// Ends timing a section and records it in the global store
    pub fn end_section(&mut self, name: &'static str) {
        if !self.config.enabled {
            return;
        }
        let Some(start_time) = self.active_timers.remove(name) else {
            return;
        };
        let duration = start_time.elapsed();
        if duration < self.config.min_duration_threshold {
            return;
        }
        if let Ok(mut data) = BENCHMARK_DATA.lock() {
            data.record_measurement(name, duration);
        }
        if self.config.trace_sections {
            trace!(section = name, ?duration, "section finished");
        }
    }
}

/// Performance metrics for a specific operation
#[derive(Debug, Clone)]
pub struct PerformanceMetrics {
    /// Number of times this operation was measured
    pub count: usize,
    /// Total duration of all measurements combined
    pub total_duration: Duration,
    /// Shortest duration recorded for this operation
    pub min_duration: Duration,
    /// Longest duration recorded for this operation
    pub max_duration: Duration,
    /// Average duration across all measurements
    pub avg_duration: Duration,
}

impl PerformanceMetrics {
    fn new() -> Self {
        Self {
            count: 0,
            total_duration: Duration::ZERO,
            min_duration: Duration::MAX,
            max_duration: Duration::ZERO,
            avg_duration: Duration::ZERO,
        }
    }

    fn update(&mut self, duration: Duration) {
        self.count += 1;
        self.total_duration += duration;
        self.min_duration = self.min_duration.min(duration);
        self.max_duration = self.max_duration.max(duration);
        self.avg_duration = self.total_duration / self.count as u32;
    }
}

lazy_static::lazy_static! {
    /// Centralized benchmark data storage
    pub static ref BENCHMARK_DATA: Arc<Mutex<BenchmarkData>> = Arc::new(Mutex::new(BenchmarkData::new()));
}

/// Central storage for all benchmark measurements
pub struct BenchmarkData {
    measurements: HashMap<String, PerformanceMetrics>,
    fps_counter: FrameRateCounter,
}

impl BenchmarkData {
    fn new() -> Self {
        Self {
            measurements: HashMap::new(),
            fps_counter: FrameRateCounter::new(BenchmarkConfig::default().max_frame_samples),
        }
    }

    /// Records a new measurement for the specified operation
    ///
    /// # Arguments
    /// * `name` - The name of the operation being measured
    /// * `duration` - The duration of the operation
    pub fn record_measurement(&mut self, name: &str, duration: Duration) {
        self.measurements
            .entry(name.to_string())
            .or_insert_with(PerformanceMetrics::new)
            .update(duration);
    }

    /// Returns a copy of all recorded measurements
    pub fn get_measurements(&self) -> HashMap<String, PerformanceMetrics> {
        self.measurements.clone()
    }

    /// Records a frame and returns the current FPS
    pub fn record_frame(&mut self) -> f64 {
        self.fps_counter.record_frame()
    }

    /// Returns FPS statistics as (min_fps, avg_fps, max_fps)
    pub fn get_fps_stats(&self) -> (f64, f64, f64) {
        let min_frame_time = self.fps_counter.get_min_frame_time();
        let max_frame_time = self.fps_counter.get_max_frame_time();

        // Fastest frame is the highest rate.
        let max_fps = if min_frame_time.as_secs_f64() > 0.0 {
            1.0 / min_frame_time.as_secs_f64()
        } else {
            0.0
        };

        let min_fps = if max_frame_time.as_secs_f64() > 0.0 {
            1.0 / max_frame_time.as_secs_f64()
        } else {
            0.0
        };

        (min_fps, self.fps_counter.get_fps(), max_fps)
    }
}
