use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::db::repositories::habit_repository::{HabitRepository, HabitRow};
use crate::db::repositories::journal_repository::{JournalRepository, JournalRow};
use crate::db::repositories::log_repository::LogRepository;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::analytics::{DashboardView, HabitDetail};
use crate::models::habit::{HabitCreateInput, HabitKind, HabitRecord};
use crate::models::journal::{JournalCreateInput, JournalRecord};
use crate::models::log::LogValue;
use crate::services::{calendar_service, score_service};

const DETAIL_HISTORY_WEEKS: u32 = 6;
const DETAIL_CALENDAR_MONTHS: u32 = 4;

pub struct HabitService {
    db: DbPool,
}

impl HabitService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub fn create_habit(&self, input: HabitCreateInput) -> AppResult<HabitRecord> {
        let kind = input.kind.unwrap_or(HabitKind::Yesno);

        if input.name.trim().is_empty() {
            return Err(AppError::validation("habit name must not be empty"));
        }

        if kind == HabitKind::Measurable {
            if input.unit.as_deref().map_or(true, |u| u.trim().is_empty()) {
                return Err(AppError::validation("measurable habits require a unit"));
            }
            if input.target.is_none() {
                return Err(AppError::validation("measurable habits require a target"));
            }
            if input.target_type.is_none() {
                return Err(AppError::validation(
                    "measurable habits require a target type",
                ));
            }
        }

        let record = HabitRecord {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            color: input.color,
            question: input.question,
            frequency: input.frequency,
            reminder: input.reminder,
            notes: input.notes,
            kind,
            unit: if kind == HabitKind::Measurable {
                input.unit
            } else {
                None
            },
            target: if kind == HabitKind::Measurable {
                input.target
            } else {
                None
            },
            target_type: if kind == HabitKind::Measurable {
                input.target_type
            } else {
                None
            },
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = self.db.get_connection()?;
        HabitRepository::insert(&conn, &HabitRow::from_record(&record))?;
        info!(target: "habitgrid::habit", habit_id = %record.id, kind = kind.as_str(), "habit created");

        Ok(record)
    }

    pub fn list_habits(&self, kind: Option<HabitKind>) -> AppResult<Vec<HabitRecord>> {
        self.db.with_connection(|conn| {
            let rows = match kind {
                Some(kind) => HabitRepository::list_by_kind(conn, kind)?,
                None => HabitRepository::list_all(conn)?,
            };

            rows.into_iter().map(HabitRow::into_record).collect()
        })
    }

    pub fn find_habit(&self, habit_id: &str) -> AppResult<HabitRecord> {
        self.db.with_connection(|conn| {
            HabitRepository::find_by_id(conn, habit_id)?
                .ok_or(AppError::NotFound)?
                .into_record()
        })
    }

    /// Removes the habit and, via the schema's cascade, all of its logs.
    pub fn delete_habit(&self, habit_id: &str) -> AppResult<()> {
        let conn = self.db.get_connection()?;
        let deleted = HabitRepository::delete(&conn, habit_id)?;
        if deleted == 0 {
            return Err(AppError::NotFound);
        }
        info!(target: "habitgrid::habit", habit_id, "habit deleted");
        Ok(())
    }

    /// Upserts the log cell for (habit, date). The value shape must match
    /// the habit kind: a status for yes/no habits, a number for
    /// measurable habits.
    pub fn log_status(&self, habit_id: &str, date: NaiveDate, value: LogValue) -> AppResult<()> {
        let conn = self.db.get_connection()?;
        let habit = HabitRepository::find_by_id(&conn, habit_id)?
            .ok_or(AppError::NotFound)?
            .into_record()?;

        match (habit.kind, &value) {
            (HabitKind::Yesno, LogValue::Status(_)) => {}
            (HabitKind::Measurable, LogValue::Measure(_)) => {}
            (HabitKind::Yesno, LogValue::Measure(_)) => {
                return Err(AppError::validation(
                    "yes/no habits take a status, not a numeric value",
                ));
            }
            (HabitKind::Measurable, LogValue::Status(_)) => {
                return Err(AppError::validation(
                    "measurable habits take a numeric value, not a status",
                ));
            }
        }

        LogRepository::upsert(&conn, habit_id, date, &value)
    }

    /// Habits split by kind plus every log in the forward horizon,
    /// keyed by habit id and date.
    pub fn dashboard(&self, ref_date: NaiveDate, horizon_days: u32) -> AppResult<DashboardView> {
        let conn = self.db.get_connection()?;

        let yesno = HabitRepository::list_by_kind(&conn, HabitKind::Yesno)?
            .into_iter()
            .map(HabitRow::into_record)
            .collect::<AppResult<Vec<_>>>()?;
        let measurable = HabitRepository::list_by_kind(&conn, HabitKind::Measurable)?
            .into_iter()
            .map(HabitRow::into_record)
            .collect::<AppResult<Vec<_>>>()?;

        let dates = calendar_service::date_horizon(ref_date, horizon_days);
        let mut logs: HashMap<String, BTreeMap<String, LogValue>> = HashMap::new();

        if let (Some(first), Some(last)) = (dates.first(), dates.last()) {
            for row in LogRepository::list_range_all(&conn, *first, *last)? {
                let habit_id = row.habit_id.clone();
                let entry = row.into_entry()?;
                logs.entry(habit_id)
                    .or_default()
                    .insert(entry.date.format("%Y-%m-%d").to_string(), entry.value);
            }
        }

        Ok(DashboardView {
            yesno_habits: yesno,
            measurable_habits: measurable,
            dates,
            logs,
        })
    }

    /// Full analytics composition for one habit: rolling 7/30/365 scores,
    /// total completions, six-week history, best streak and four trailing
    /// calendar months.
    pub fn detail(&self, habit_id: &str, ref_date: NaiveDate) -> AppResult<HabitDetail> {
        let conn = self.db.get_connection()?;
        let habit = HabitRepository::find_by_id(&conn, habit_id)?
            .ok_or(AppError::NotFound)?
            .into_record()?;

        let entries = LogRepository::list_for_habit(&conn, habit_id)?;
        let lookup = calendar_service::build_lookup(&entries);

        Ok(HabitDetail {
            score_week: score_service::rolling_completion(&entries, ref_date, 7),
            score_month: score_service::rolling_completion(&entries, ref_date, 30),
            score_year: score_service::rolling_completion(&entries, ref_date, 365),
            total_done: score_service::total_done(&entries),
            weekly_history: score_service::weekly_history(&entries, ref_date, DETAIL_HISTORY_WEEKS),
            best_streak: score_service::best_streak(&entries),
            calendar: calendar_service::trailing_months(
                &lookup,
                ref_date,
                DETAIL_CALENDAR_MONTHS,
                habit.kind,
            )?,
            habit,
            reference_date: ref_date,
        })
    }

    pub fn add_journal_entry(&self, input: JournalCreateInput) -> AppResult<JournalRecord> {
        if input.body.trim().is_empty() {
            return Err(AppError::validation("journal entry must not be empty"));
        }

        let record = JournalRecord {
            id: Uuid::new_v4().to_string(),
            date: input.date,
            body: input.body,
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = self.db.get_connection()?;
        JournalRepository::insert(&conn, &JournalRow::from_record(&record))?;

        Ok(record)
    }

    pub fn list_journal_entries(&self) -> AppResult<Vec<JournalRecord>> {
        self.db.with_connection(|conn| {
            JournalRepository::list_all(conn)?
                .into_iter()
                .map(JournalRow::into_record)
                .collect()
        })
    }
}
