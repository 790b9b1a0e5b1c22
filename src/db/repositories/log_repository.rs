use std::convert::TryFrom;

use chrono::NaiveDate;
use rusqlite::{named_params, Connection, Row};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::log::{LogEntry, LogStatus, LogValue};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct LogRow {
    pub habit_id: String,
    pub log_date: String,
    pub status: Option<String>,
    pub value: Option<f64>,
}

impl LogRow {
    /// Normalization boundary: legacy stores used several vocabularies
    /// for yes/no logs (booleans, 1/0). Everything is translated into
    /// the canonical `pending`/`done`/`missed` model here.
    pub fn into_entry(self) -> AppResult<LogEntry> {
        let date = parse_date(&self.log_date)?;

        let value = match (self.status, self.value) {
            (Some(raw), _) => {
                let status = LogStatus::parse(&raw).unwrap_or_else(|| {
                    if matches!(raw.as_str(), "True" | "true" | "1" | "yes" | "y") {
                        LogStatus::Done
                    } else {
                        LogStatus::Missed
                    }
                });
                LogValue::Status(status)
            }
            (None, Some(value)) => LogValue::Measure(value),
            (None, None) => LogValue::Status(LogStatus::Pending),
        };

        Ok(LogEntry { date, value })
    }
}

impl TryFrom<&Row<'_>> for LogRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            habit_id: row.get("habit_id")?,
            log_date: row.get("log_date")?,
            status: row.get("status")?,
            value: row.get("value")?,
        })
    }
}

pub struct LogRepository;

impl LogRepository {
    /// Upserts the log cell for (habit, date). The native ON CONFLICT
    /// clause serializes concurrent writers inside SQLite, so the
    /// read-check-write race of a select-then-insert cannot produce
    /// duplicate rows.
    pub fn upsert(
        conn: &Connection,
        habit_id: &str,
        date: NaiveDate,
        value: &LogValue,
    ) -> AppResult<()> {
        let (status, measure) = match value {
            LogValue::Status(status) => (Some(status.as_str()), None),
            LogValue::Measure(measure) => (None, Some(*measure)),
        };

        conn.execute(
            r#"
                INSERT INTO habit_logs (habit_id, log_date, status, value)
                VALUES (:habit_id, :log_date, :status, :value)
                ON CONFLICT(habit_id, log_date) DO UPDATE SET
                    status = excluded.status,
                    value = excluded.value
            "#,
            named_params! {
                ":habit_id": habit_id,
                ":log_date": date.format(DATE_FORMAT).to_string(),
                ":status": status,
                ":value": measure,
            },
        )?;

        debug!(target: "habitgrid::db", habit_id, date = %date, "log cell upserted");
        Ok(())
    }

    /// All entries for one habit, ascending by date.
    pub fn list_for_habit(conn: &Connection, habit_id: &str) -> AppResult<Vec<LogEntry>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT habit_id, log_date, status, value
            FROM habit_logs
            WHERE habit_id = ?1
            ORDER BY log_date
        "#,
        )?;

        let rows = stmt
            .query_map([habit_id], |row| LogRow::try_from(row))?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(LogRow::into_entry).collect()
    }

    /// Entries for every habit within [from, to], as raw rows so callers
    /// can key by habit id.
    pub fn list_range_all(
        conn: &Connection,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<LogRow>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT habit_id, log_date, status, value
            FROM habit_logs
            WHERE log_date >= :from AND log_date <= :to
            ORDER BY habit_id, log_date
        "#,
        )?;

        let rows = stmt
            .query_map(
                named_params! {
                    ":from": from.format(DATE_FORMAT).to_string(),
                    ":to": to.format(DATE_FORMAT).to_string(),
                },
                |row| LogRow::try_from(row),
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    pub fn count_for_habit(conn: &Connection, habit_id: &str) -> AppResult<usize> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM habit_logs WHERE habit_id = ?1",
            [habit_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|err| AppError::validation(format!("invalid date '{raw}': {err}")))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
