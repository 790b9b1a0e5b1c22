use std::convert::TryFrom;

use rusqlite::{named_params, Connection, OptionalExtension, Row};

use crate::error::{AppError, AppResult};
use crate::models::habit::{HabitKind, HabitRecord, TargetType};

const BASE_SELECT: &str = r#"
    SELECT
        id,
        name,
        color,
        question,
        frequency,
        reminder,
        notes,
        kind,
        unit,
        target,
        target_type,
        created_at
    FROM habits
"#;

#[derive(Debug, Clone)]
pub struct HabitRow {
    pub id: String,
    pub name: String,
    pub color: String,
    pub question: String,
    pub frequency: String,
    pub reminder: String,
    pub notes: Option<String>,
    pub kind: String,
    pub unit: Option<String>,
    pub target: Option<f64>,
    pub target_type: Option<String>,
    pub created_at: String,
}

impl HabitRow {
    pub fn from_record(record: &HabitRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            color: record.color.clone(),
            question: record.question.clone(),
            frequency: record.frequency.clone(),
            reminder: record.reminder.clone(),
            notes: record.notes.clone(),
            kind: record.kind.as_str().to_string(),
            unit: record.unit.clone(),
            target: record.target,
            target_type: record.target_type.map(|t| t.as_str().to_string()),
            created_at: record.created_at.clone(),
        }
    }

    pub fn into_record(self) -> AppResult<HabitRecord> {
        let kind = HabitKind::parse(&self.kind)
            .ok_or_else(|| AppError::database(format!("unknown habit kind: {}", self.kind)))?;
        let target_type = match self.target_type {
            Some(raw) => Some(TargetType::parse(&raw).ok_or_else(|| {
                AppError::database(format!("unknown target type: {raw}"))
            })?),
            None => None,
        };

        Ok(HabitRecord {
            id: self.id,
            name: self.name,
            color: self.color,
            question: self.question,
            frequency: self.frequency,
            reminder: self.reminder,
            notes: self.notes,
            kind,
            unit: self.unit,
            target: self.target,
            target_type,
            created_at: self.created_at,
        })
    }
}

impl TryFrom<&Row<'_>> for HabitRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            color: row.get("color")?,
            question: row.get("question")?,
            frequency: row.get("frequency")?,
            reminder: row.get("reminder")?,
            notes: row.get("notes")?,
            kind: row.get("kind")?,
            unit: row.get("unit")?,
            target: row.get("target")?,
            target_type: row.get("target_type")?,
            created_at: row.get("created_at")?,
        })
    }
}

pub struct HabitRepository;

impl HabitRepository {
    pub fn insert(conn: &Connection, row: &HabitRow) -> AppResult<()> {
        conn.execute(
            r#"
                INSERT INTO habits (
                    id,
                    name,
                    color,
                    question,
                    frequency,
                    reminder,
                    notes,
                    kind,
                    unit,
                    target,
                    target_type,
                    created_at
                ) VALUES (
                    :id,
                    :name,
                    :color,
                    :question,
                    :frequency,
                    :reminder,
                    :notes,
                    :kind,
                    :unit,
                    :target,
                    :target_type,
                    :created_at
                )
            "#,
            named_params! {
                ":id": &row.id,
                ":name": &row.name,
                ":color": &row.color,
                ":question": &row.question,
                ":frequency": &row.frequency,
                ":reminder": &row.reminder,
                ":notes": &row.notes,
                ":kind": &row.kind,
                ":unit": &row.unit,
                ":target": &row.target,
                ":target_type": &row.target_type,
                ":created_at": &row.created_at,
            },
        )?;

        Ok(())
    }

    pub fn find_by_id(conn: &Connection, id: &str) -> AppResult<Option<HabitRow>> {
        let sql = format!("{BASE_SELECT} WHERE id = ?1");
        let mut stmt = conn.prepare(&sql)?;

        let row = stmt
            .query_row([id], |row| HabitRow::try_from(row))
            .optional()?;

        Ok(row)
    }

    pub fn list_by_kind(conn: &Connection, kind: HabitKind) -> AppResult<Vec<HabitRow>> {
        let sql = format!("{BASE_SELECT} WHERE kind = ?1 ORDER BY created_at, id");
        let mut stmt = conn.prepare(&sql)?;

        let rows = stmt
            .query_map([kind.as_str()], |row| HabitRow::try_from(row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    pub fn list_all(conn: &Connection) -> AppResult<Vec<HabitRow>> {
        let sql = format!("{BASE_SELECT} ORDER BY created_at, id");
        let mut stmt = conn.prepare(&sql)?;

        let rows = stmt
            .query_map([], |row| HabitRow::try_from(row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Deletes the habit row; log rows follow via ON DELETE CASCADE.
    pub fn delete(conn: &Connection, id: &str) -> AppResult<usize> {
        let deleted = conn.execute("DELETE FROM habits WHERE id = ?1", [id])?;
        Ok(deleted)
    }
}
