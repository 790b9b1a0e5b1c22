use chrono::Utc;
use rusqlite::Connection;
use tracing::{info, warn};

use crate::error::AppResult;

const USER_VERSION: i32 = 2;

pub fn run(conn: &Connection) -> AppResult<()> {
    // Ensure migration history table exists
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS migration_history (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL
        );
        "#,
    )?;

    let mut current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current_version < 1 {
        info!(target: "habitgrid::db", version = current_version, "running migration v1");
        migrate_to_v1(conn)?;
        current_version = 1;
        conn.execute(&format!("PRAGMA user_version = {}", current_version), [])?;
        record_migration(conn, 1, "Normalize legacy yes/no log statuses")?;
    }

    if current_version < 2 {
        info!(target: "habitgrid::db", version = current_version, "running migration v2");
        migrate_to_v2(conn)?;
        current_version = 2;
        conn.execute(&format!("PRAGMA user_version = {}", current_version), [])?;
        record_migration(conn, 2, "Deduplicate habit logs and enforce one row per habit/date")?;
    }

    if current_version > USER_VERSION {
        warn!(
            target: "habitgrid::db",
            version = current_version,
            supported = USER_VERSION,
            "database schema is newer than this build; leaving it untouched"
        );
    }

    Ok(())
}

/// Earlier data sets used boolean-ish vocabularies for yes/no logs
/// ('True'/'False', '1'/'0', 'yes'/'no'). The canonical model is the
/// three-state 'pending'/'done'/'missed'; everything truthy maps to
/// 'done' and everything falsy to 'missed' (an explicit falsy log is a
/// recorded miss, not an absent entry).
fn migrate_to_v1(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        UPDATE habit_logs
        SET status = 'done'
        WHERE status IN ('True', 'true', '1', 'yes', 'y');

        UPDATE habit_logs
        SET status = 'missed'
        WHERE status IN ('False', 'false', '0', 'no', 'n');
        "#,
    )?;
    Ok(())
}

/// One legacy variant lacked the UNIQUE(habit_id, log_date) constraint and
/// could accumulate duplicate rows for the same key. Keep the newest row
/// (highest rowid) for each (habit, date) pair, then add the unique index
/// so the upsert's ON CONFLICT clause has a constraint to target.
fn migrate_to_v2(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        DELETE FROM habit_logs
        WHERE id NOT IN (
            SELECT MAX(id) FROM habit_logs GROUP BY habit_id, log_date
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_habit_logs_unique_habit_date
            ON habit_logs (habit_id, log_date);
        "#,
    )?;
    Ok(())
}

fn record_migration(conn: &Connection, version: i32, description: &str) -> AppResult<()> {
    conn.execute(
        r#"
        INSERT OR IGNORE INTO migration_history (version, description, applied_at)
        VALUES (?1, ?2, ?3)
        "#,
        rusqlite::params![version, description, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}
