use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::log::LogValue;

// The export bundle keeps the historical snake_case wire shape so that
// bundles produced by earlier versions of the tracker stay importable.

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportLog {
    pub date: String,
    pub value: LogValue,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportHabit {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
    pub question: String,
    pub frequency: String,
    pub reminder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    pub logs: Vec<ExportLog>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportJournal {
    pub id: String,
    pub date: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CompletionRate {
    pub completed: u32,
    pub total: u32,
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MeasurableStats {
    pub average: f64,
    pub total_entries: u32,
    pub highest: f64,
    pub lowest: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExportStatistics {
    pub habit_completion_rates: BTreeMap<String, CompletionRate>,
    pub measurable_averages: BTreeMap<String, MeasurableStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportBundle {
    pub habits: Vec<ExportHabit>,
    pub measurables: Vec<ExportHabit>,
    pub journals: Vec<ExportJournal>,
    pub statistics: ExportStatistics,
}
