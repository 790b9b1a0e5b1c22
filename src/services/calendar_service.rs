//! Calendar bucketing for the habit detail view. Every calendar day in
//! the requested range appears exactly once in the output, whether or
//! not anything was logged for it.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{AppError, AppResult};
use crate::models::calendar::{CalendarDay, CalendarMonth};
use crate::models::habit::HabitKind;
use crate::models::log::{LogEntry, LogStatus, LogValue};

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn days_in_month(year: i32, month: u32) -> AppResult<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation(format!("invalid month: {year}-{month}")))?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| AppError::validation(format!("invalid month: {year}-{month}")))?;

    Ok((next_month - first).num_days() as u32)
}

/// Buckets one calendar month. Yes/no habits get the `pending` default
/// for unlogged days; measurable habits get no value for those days.
pub fn month_view(
    lookup: &BTreeMap<NaiveDate, LogValue>,
    year: i32,
    month: u32,
    kind: HabitKind,
) -> AppResult<CalendarMonth> {
    let ndays = days_in_month(year, month)?;
    let mut days = Vec::with_capacity(ndays as usize);

    for day in 1..=ndays {
        // Safe: day is within the month by construction.
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| AppError::other(format!("invalid day: {year}-{month}-{day}")))?;
        let logged = lookup.get(&date);

        let entry = match kind {
            HabitKind::Yesno => {
                let status = logged
                    .and_then(LogValue::as_status)
                    .unwrap_or(LogStatus::Pending);
                CalendarDay {
                    day,
                    status: Some(status),
                    value: None,
                }
            }
            HabitKind::Measurable => CalendarDay {
                day,
                status: None,
                value: logged.and_then(LogValue::as_measure),
            },
        };
        days.push(entry);
    }

    Ok(CalendarMonth {
        year,
        month,
        label: MONTH_ABBR[(month - 1) as usize].to_string(),
        days,
    })
}

/// The `count` calendar months ending with `ref_date`'s month, oldest
/// first.
pub fn trailing_months(
    lookup: &BTreeMap<NaiveDate, LogValue>,
    ref_date: NaiveDate,
    count: u32,
    kind: HabitKind,
) -> AppResult<Vec<CalendarMonth>> {
    let mut months = Vec::with_capacity(count as usize);

    for offset in (0..i32::try_from(count).unwrap_or(0)).rev() {
        let mut month = ref_date.month() as i32 - offset;
        let mut year = ref_date.year();
        while month < 1 {
            month += 12;
            year -= 1;
        }
        months.push(month_view(lookup, year, month as u32, kind)?);
    }

    Ok(months)
}

/// Builds the per-date lookup the bucketizer consumes.
pub fn build_lookup(entries: &[LogEntry]) -> BTreeMap<NaiveDate, LogValue> {
    entries
        .iter()
        .map(|entry| (entry.date, entry.value))
        .collect()
}

/// Consecutive dates starting at `from`, used by the dashboard horizon.
pub fn date_horizon(from: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..i64::from(days))
        .map(|offset| from + Duration::days(offset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(2024, 12).unwrap(), 31);
        assert_eq!(days_in_month(2024, 4).unwrap(), 30);
    }

    #[test]
    fn days_in_month_rejects_invalid_month() {
        assert!(days_in_month(2024, 13).is_err());
        assert!(days_in_month(2024, 0).is_err());
    }

    #[test]
    fn month_view_emits_every_day_exactly_once() {
        let lookup = BTreeMap::new();
        let month = month_view(&lookup, 2024, 2, HabitKind::Yesno).unwrap();

        assert_eq!(month.days.len(), 29);
        for (index, day) in month.days.iter().enumerate() {
            assert_eq!(day.day, index as u32 + 1);
        }
    }

    #[test]
    fn month_view_defaults_unlogged_yesno_days_to_pending() {
        let mut lookup = BTreeMap::new();
        lookup.insert(date(2024, 1, 5), LogValue::Status(LogStatus::Done));
        lookup.insert(date(2024, 1, 6), LogValue::Status(LogStatus::Missed));

        let month = month_view(&lookup, 2024, 1, HabitKind::Yesno).unwrap();

        assert_eq!(month.days[4].status, Some(LogStatus::Done));
        assert_eq!(month.days[5].status, Some(LogStatus::Missed));
        assert_eq!(month.days[0].status, Some(LogStatus::Pending));
        assert_eq!(month.days[30].status, Some(LogStatus::Pending));
    }

    #[test]
    fn month_view_omits_values_for_unlogged_measurable_days() {
        let mut lookup = BTreeMap::new();
        lookup.insert(date(2024, 1, 10), LogValue::Measure(3.5));

        let month = month_view(&lookup, 2024, 1, HabitKind::Measurable).unwrap();

        assert_eq!(month.days[9].value, Some(3.5));
        assert_eq!(month.days[9].status, None);
        assert_eq!(month.days[0].value, None);
        assert_eq!(month.days[11].value, None);
    }

    #[test]
    fn month_view_labels_use_three_letter_abbreviation() {
        let lookup = BTreeMap::new();
        let month = month_view(&lookup, 2024, 3, HabitKind::Yesno).unwrap();
        assert_eq!(month.label, "Mar");
        assert_eq!(month.year, 2024);
        assert_eq!(month.month, 3);
    }

    #[test]
    fn trailing_months_crosses_year_boundary_oldest_first() {
        let lookup = BTreeMap::new();
        let months = trailing_months(&lookup, date(2024, 2, 15), 4, HabitKind::Yesno).unwrap();

        let labels: Vec<(i32, u32)> = months.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(labels, vec![(2023, 11), (2023, 12), (2024, 1), (2024, 2)]);
    }

    #[test]
    fn build_lookup_keys_entries_by_date() {
        let entries = vec![
            LogEntry::new(date(2024, 1, 1), LogValue::Status(LogStatus::Done)),
            LogEntry::new(date(2024, 1, 2), LogValue::Measure(2.0)),
        ];
        let lookup = build_lookup(&entries);

        assert_eq!(lookup.len(), 2);
        assert_eq!(
            lookup.get(&date(2024, 1, 1)),
            Some(&LogValue::Status(LogStatus::Done))
        );
    }

    #[test]
    fn date_horizon_is_consecutive() {
        let horizon = date_horizon(date(2024, 1, 30), 4);
        assert_eq!(
            horizon,
            vec![
                date(2024, 1, 30),
                date(2024, 1, 31),
                date(2024, 2, 1),
                date(2024, 2, 2),
            ]
        );
    }
}
