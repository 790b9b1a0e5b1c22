use std::collections::BTreeMap;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::db::repositories::habit_repository::{HabitRepository, HabitRow};
use crate::db::repositories::journal_repository::{JournalRepository, JournalRow};
use crate::db::repositories::log_repository::{format_date, parse_date, LogRepository};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::export::{
    CompletionRate, ExportBundle, ExportHabit, ExportJournal, ExportLog, ExportStatistics,
    MeasurableStats,
};
use crate::models::habit::{HabitKind, HabitRecord, TargetType};
use crate::services::stats_service;

/// Builds and consumes the structured export bundle. The JSON key shape
/// is frozen for compatibility with bundles produced by earlier versions
/// of the tracker.
pub struct ExportService {
    db: DbPool,
}

impl ExportService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub fn build_bundle(&self) -> AppResult<ExportBundle> {
        let conn = self.db.get_connection()?;

        let mut habits = Vec::new();
        let mut measurables = Vec::new();
        let mut habit_completion_rates: BTreeMap<String, CompletionRate> = BTreeMap::new();
        let mut measurable_averages: BTreeMap<String, MeasurableStats> = BTreeMap::new();

        for row in HabitRepository::list_all(&conn)? {
            let record = row.into_record()?;
            let entries = LogRepository::list_for_habit(&conn, &record.id)?;

            let logs = entries
                .iter()
                .map(|entry| ExportLog {
                    date: format_date(entry.date),
                    value: entry.value,
                })
                .collect();

            match record.kind {
                HabitKind::Yesno => {
                    habit_completion_rates
                        .insert(record.name.clone(), stats_service::completion_rate(&entries));
                    habits.push(export_habit(&record, logs));
                }
                HabitKind::Measurable => {
                    measurable_averages
                        .insert(record.name.clone(), stats_service::measurable_stats(&entries));
                    measurables.push(export_habit(&record, logs));
                }
            }
        }

        let journals = JournalRepository::list_all(&conn)?
            .into_iter()
            .map(|row| ExportJournal {
                id: row.id,
                date: row.entry_date,
                body: row.body,
            })
            .collect();

        info!(
            target: "habitgrid::export",
            habits = habits.len(),
            measurables = measurables.len(),
            "export bundle built"
        );

        Ok(ExportBundle {
            habits,
            measurables,
            journals,
            statistics: ExportStatistics {
                habit_completion_rates,
                measurable_averages,
            },
        })
    }

    pub fn export_json(&self) -> AppResult<String> {
        let bundle = self.build_bundle()?;
        Ok(serde_json::to_string_pretty(&bundle)?)
    }

    /// Spreadsheet output needs an optional writer that is not bundled
    /// with this build; callers get a recoverable error, not a crash.
    pub fn export_spreadsheet(&self) -> AppResult<Vec<u8>> {
        Err(AppError::feature_unavailable(
            "spreadsheet export",
            "no spreadsheet writer is bundled with this build",
        ))
    }

    /// Recreates habits, logs and journals from a bundle. Log writes go
    /// through the upsert path, so importing over existing data
    /// converges on the bundle's (habit, date, value) set.
    pub fn import_bundle(&self, bundle: &ExportBundle) -> AppResult<()> {
        let conn = self.db.get_connection()?;

        for habit in bundle.habits.iter().chain(bundle.measurables.iter()) {
            let kind = HabitKind::parse(&habit.kind).ok_or_else(|| {
                AppError::validation(format!("unknown habit kind in bundle: {}", habit.kind))
            })?;
            let target_type = match &habit.target_type {
                Some(raw) => Some(TargetType::parse(raw).ok_or_else(|| {
                    AppError::validation(format!("unknown target type in bundle: {raw}"))
                })?),
                None => None,
            };

            let record = HabitRecord {
                id: habit.id.clone(),
                name: habit.name.clone(),
                color: habit.color.clone(),
                question: habit.question.clone(),
                frequency: habit.frequency.clone(),
                reminder: habit.reminder.clone(),
                notes: habit.notes.clone(),
                kind,
                unit: habit.unit.clone(),
                target: habit.target,
                target_type,
                created_at: Utc::now().to_rfc3339(),
            };

            if HabitRepository::find_by_id(&conn, &record.id)?.is_none() {
                HabitRepository::insert(&conn, &HabitRow::from_record(&record))?;
            }

            for log in &habit.logs {
                let date = parse_date(&log.date)?;
                LogRepository::upsert(&conn, &habit.id, date, &log.value)?;
            }
        }

        for journal in &bundle.journals {
            let row = JournalRow {
                id: if journal.id.is_empty() {
                    Uuid::new_v4().to_string()
                } else {
                    journal.id.clone()
                },
                entry_date: journal.date.clone(),
                body: journal.body.clone(),
                created_at: Utc::now().to_rfc3339(),
            };
            // Re-imported journals with known ids are already present.
            match JournalRepository::insert(&conn, &row) {
                Ok(()) | Err(AppError::Conflict { .. }) => {}
                Err(err) => return Err(err),
            }
        }

        info!(target: "habitgrid::export", "bundle imported");
        Ok(())
    }
}

fn export_habit(record: &HabitRecord, logs: Vec<ExportLog>) -> ExportHabit {
    ExportHabit {
        id: record.id.clone(),
        name: record.name.clone(),
        kind: record.kind.as_str().to_string(),
        color: record.color.clone(),
        question: record.question.clone(),
        frequency: record.frequency.clone(),
        reminder: record.reminder.clone(),
        notes: record.notes.clone(),
        unit: record.unit.clone(),
        target: record.target,
        target_type: record.target_type.map(|t| t.as_str().to_string()),
        logs,
    }
}
