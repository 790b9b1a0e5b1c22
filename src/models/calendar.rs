use serde::{Deserialize, Serialize};

use crate::models::log::LogStatus;

/// One calendar day. Yes/no habits always carry a status (`pending` when
/// nothing is logged); measurable habits carry a value only for days that
/// were actually logged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub day: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LogStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub days: Vec<CalendarDay>,
}
