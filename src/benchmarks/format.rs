//! Benchmark result formatting utilities
//!
//! Turns recorded section metrics into a fixed-width table for the exit summary.

use chrono::{DateTime, Local};

use super::data::PerformanceMetrics;

/// Helper function to calculate column widths for benchmark table formatting
///
/// # Arguments
/// * `benchmarks` - A slice of tuples containing benchmark names and their metrics
///
/// # Returns
/// A tuple of column widths in the order: (name, count, total, avg, min, max)
pub fn calculate_column_widths(
    benchmarks: &[(&String, &PerformanceMetrics)],
) -> (usize, usize, usize, usize, usize, usize) {
    let mut name_width = 12;
    let mut count_width = 6;
    let mut total_width = 12;
    let mut avg_width = 10;
    let mut min_width = 10;
    let mut max_width = 10;

    for (name, metrics) in benchmarks {
        name_width = name_width.max(name.len());
        count_width = count_width.max(metrics.count.to_string().len());
        total_width = total_width.max(format!("{:?}", metrics.total_duration).len());
        avg_width = avg_width.max(format!("{:?}", metrics.avg_duration).len());
        min_width = min_width.max(format!("{:?}", metrics.min_duration).len());
        max_width = max_width.max(format!("{:?}", metrics.max_duration).len());
    }

    (
        name_width,
        count_width,
        total_width,
        avg_width,
        min_width,
        max_width,
    )
}

/// Formats a summary table, most expensive section first.
///
/// # Arguments
/// * `benchmarks` - Section names and their metrics, in any order
/// * `fps` - `(min, avg, max)` frame rate
/// * `generated_at` - Timestamp printed in the heading
pub fn format_table(
    benchmarks: &mut [(&String, &PerformanceMetrics)],
    fps: (f64, f64, f64),
    generated_at: DateTime<Local>,
) -> String {
    benchmarks.sort_by(|a, b| b.1.total_duration.cmp(&a.1.total_duration));
    let (name_w, count_w, total_w, avg_w, min_w, max_w) = calculate_column_widths(benchmarks);

    let mut out = format!(
        "=== FRAME BUDGET {} ===\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    let (min_fps, avg_fps, max_fps) = fps;
    if avg_fps > 0.0 {
        out.push_str(&format!(
            "FPS min {min_fps:.1} / avg {avg_fps:.1} / max {max_fps:.1}\n"
        ));
    } else {
        out.push_str("FPS no frame data recorded\n");
    }

    out.push_str(&format!(
        "{:<name_w$} | {:>count_w$} | {:>total_w$} | {:>avg_w$} | {:>min_w$} | {:>max_w$}\n",
        "Section", "Count", "Total", "Avg", "Min", "Max",
    ));
    out.push_str(&"-".repeat(name_w + count_w + total_w + avg_w + min_w + max_w + 15));
    out.push('\n');

    for (name, m) in benchmarks.iter() {
        out.push_str(&format!(
            "{:<name_w$} | {:>count_w$} | {:>total_w$} | {:>avg_w$} | {:>min_w$} | {:>max_w$}\n",
            name,
            m.count,
            format!("{:?}", m.total_duration),
            format!("{:?}", m.avg_duration),
            format!("{:?}", m.min_duration),
            format!("{:?}", m.max_duration),
        ));
    }
    out
}
