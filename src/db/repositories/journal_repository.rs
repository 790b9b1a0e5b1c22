use std::convert::TryFrom;

use rusqlite::{named_params, Connection, Row};

use crate::db::repositories::log_repository::parse_date;
use crate::error::AppResult;
use crate::models::journal::JournalRecord;

#[derive(Debug, Clone)]
pub struct JournalRow {
    pub id: String,
    pub entry_date: String,
    pub body: String,
    pub created_at: String,
}

impl JournalRow {
    pub fn from_record(record: &JournalRecord) -> Self {
        Self {
            id: record.id.clone(),
            entry_date: record.date.format("%Y-%m-%d").to_string(),
            body: record.body.clone(),
            created_at: record.created_at.clone(),
        }
    }

    pub fn into_record(self) -> AppResult<JournalRecord> {
        Ok(JournalRecord {
            id: self.id,
            date: parse_date(&self.entry_date)?,
            body: self.body,
            created_at: self.created_at,
        })
    }
}

impl TryFrom<&Row<'_>> for JournalRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.get("id")?,
            entry_date: row.get("entry_date")?,
            body: row.get("body")?,
            created_at: row.get("created_at")?,
        })
    }
}

pub struct JournalRepository;

impl JournalRepository {
    pub fn insert(conn: &Connection, row: &JournalRow) -> AppResult<()> {
        conn.execute(
            r#"
                INSERT INTO journal_entries (id, entry_date, body, created_at)
                VALUES (:id, :entry_date, :body, :created_at)
            "#,
            named_params! {
                ":id": &row.id,
                ":entry_date": &row.entry_date,
                ":body": &row.body,
                ":created_at": &row.created_at,
            },
        )?;

        Ok(())
    }

    pub fn list_all(conn: &Connection) -> AppResult<Vec<JournalRow>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT id, entry_date, body, created_at
            FROM journal_entries
            ORDER BY entry_date, created_at
        "#,
        )?;

        let rows = stmt
            .query_map([], |row| JournalRow::try_from(row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}
