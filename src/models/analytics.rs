use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::calendar::CalendarMonth;
use crate::models::habit::HabitRecord;
use crate::models::log::LogValue;

/// Longest run of consecutive truthy daily entries. Bounds are `None`
/// when no truthy entry exists.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub length: u32,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Everything the habit detail view needs: rolling scores over the
/// standard windows, total completions, recent weekly history, best
/// streak and the trailing calendar months.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDetail {
    pub habit: HabitRecord,
    pub reference_date: NaiveDate,
    pub score_week: i64,
    pub score_month: i64,
    pub score_year: i64,
    pub total_done: u32,
    pub weekly_history: Vec<u32>,
    pub best_streak: StreakSummary,
    pub calendar: Vec<CalendarMonth>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub yesno_habits: Vec<HabitRecord>,
    pub measurable_habits: Vec<HabitRecord>,
    pub dates: Vec<NaiveDate>,
    /// habit id -> date key (`YYYY-MM-DD`) -> logged value.
    pub logs: HashMap<String, BTreeMap<String, LogValue>>,
}
