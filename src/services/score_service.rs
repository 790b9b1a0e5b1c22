//! Streak and rolling-score computation. Everything here is a pure
//! function of the entry slice and a reference date; callers load the
//! entries (ascending by date) from the log repository.

use chrono::{Duration, NaiveDate};

use crate::models::analytics::StreakSummary;
use crate::models::log::LogEntry;

/// Percentage of truthy days within the trailing window ending at
/// `ref_date` (inclusive). `round(count / window * 100)`, capped at 99
/// unless every day of the window is truthy: 100 means a full window,
/// not a rounded-up 99.7.
pub fn rolling_completion(entries: &[LogEntry], ref_date: NaiveDate, window_days: u32) -> i64 {
    if window_days == 0 {
        return 0;
    }

    let window_start = ref_date - Duration::days(i64::from(window_days) - 1);
    let count = entries
        .iter()
        .filter(|entry| {
            entry.date >= window_start && entry.date <= ref_date && entry.value.is_truthy()
        })
        .count();

    if count >= window_days as usize {
        return 100;
    }

    let pct = ((count as f64 / f64::from(window_days)) * 100.0).round() as i64;
    pct.min(99)
}

/// Longest run of consecutive truthy days. A streak extends only when
/// the entry is truthy and its date is exactly one day after the
/// previous truthy entry's date; a truthy entry after a gap starts a new
/// streak of length 1. Strict comparison keeps the earliest-found
/// maximum on ties.
pub fn best_streak(entries: &[LogEntry]) -> StreakSummary {
    let mut best = StreakSummary::default();
    let mut current: u32 = 0;
    let mut current_start: Option<NaiveDate> = None;
    let mut prev_truthy: Option<NaiveDate> = None;

    for entry in entries {
        if entry.value.is_truthy() {
            match prev_truthy {
                Some(prev) if entry.date - prev == Duration::days(1) => current += 1,
                _ => {
                    current = 1;
                    current_start = Some(entry.date);
                }
            }
            prev_truthy = Some(entry.date);

            if current > best.length {
                best.length = current;
                best.start = current_start;
                best.end = Some(entry.date);
            }
        } else {
            current = 0;
        }
    }

    best
}

/// Truthy counts for the most recent `num_weeks` non-overlapping 7-day
/// blocks, the last block ending at `ref_date`. Oldest block first.
pub fn weekly_history(entries: &[LogEntry], ref_date: NaiveDate, num_weeks: u32) -> Vec<u32> {
    let mut history = Vec::with_capacity(num_weeks as usize);

    for week in (1..=i64::from(num_weeks)).rev() {
        let start = ref_date - Duration::days(week * 7 - 1);
        let end = start + Duration::days(6);
        let count = entries
            .iter()
            .filter(|entry| entry.date >= start && entry.date <= end && entry.value.is_truthy())
            .count();
        history.push(count as u32);
    }

    history
}

/// Total truthy entries over all time.
pub fn total_done(entries: &[LogEntry]) -> u32 {
    entries.iter().filter(|entry| entry.value.is_truthy()).count() as u32
}
