use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical three-state model for yes/no habits. Legacy boolean shapes
/// are normalized into this vocabulary at the repository boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Pending,
    Done,
    Missed,
}

impl LogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogStatus::Pending => "pending",
            LogStatus::Done => "done",
            LogStatus::Missed => "missed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(LogStatus::Pending),
            "done" => Some(LogStatus::Done),
            "missed" => Some(LogStatus::Missed),
            _ => None,
        }
    }
}

/// One dated observation. Yes/no habits log a status, measurable habits
/// log a number; the untagged representation keeps the JSON shape flat
/// (a bare string or a bare number).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LogValue {
    Status(LogStatus),
    Measure(f64),
}

impl LogValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            LogValue::Status(status) => *status == LogStatus::Done,
            LogValue::Measure(value) => *value > 0.0,
        }
    }

    pub fn as_status(&self) -> Option<LogStatus> {
        match self {
            LogValue::Status(status) => Some(*status),
            LogValue::Measure(_) => None,
        }
    }

    pub fn as_measure(&self) -> Option<f64> {
        match self {
            LogValue::Status(_) => None,
            LogValue::Measure(value) => Some(*value),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub date: NaiveDate,
    pub value: LogValue,
}

impl LogEntry {
    pub fn new(date: NaiveDate, value: LogValue) -> Self {
        Self { date, value }
    }
}
