//! Per-habit aggregate statistics for reporting and export. Empty or
//! all-zero series produce neutral zero results, never an error.

use crate::models::export::{CompletionRate, MeasurableStats};
use crate::models::log::LogEntry;

/// truthy / total, guarded against an empty denominator.
pub fn completion_rate(entries: &[LogEntry]) -> CompletionRate {
    let total = entries.len() as u32;
    let completed = entries.iter().filter(|e| e.value.is_truthy()).count() as u32;
    let rate = if total > 0 {
        f64::from(completed) / f64::from(total)
    } else {
        0.0
    };

    CompletionRate {
        completed,
        total,
        rate,
    }
}

/// Average, highest and lowest over values strictly greater than zero.
/// Zero and status-typed entries are excluded from the aggregate; the
/// raw dated series reaches charts through the export bundle's logs.
pub fn measurable_stats(entries: &[LogEntry]) -> MeasurableStats {
    let values: Vec<f64> = entries
        .iter()
        .filter_map(|e| e.value.as_measure())
        .filter(|v| *v > 0.0)
        .collect();

    if values.is_empty() {
        return MeasurableStats::default();
    }

    let total_entries = values.len() as u32;
    let sum: f64 = values.iter().sum();
    let highest = values.iter().cloned().fold(f64::MIN, f64::max);
    let lowest = values.iter().cloned().fold(f64::MAX, f64::min);

    MeasurableStats {
        average: sum / f64::from(total_entries),
        total_entries,
        highest,
        lowest,
    }
}
