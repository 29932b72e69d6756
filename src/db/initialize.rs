use crate::errors::AppResult;
use rusqlite::{Connection, OptionalExtension, Result};

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `signals` table (one row per monitored tag).
fn create_signals_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS signals (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            name         TEXT NOT NULL,
            description  TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_signals_name ON signals(name);
        "#,
    )?;
    Ok(())
}

/// Create the `samples` table. A NULL `value` is a missing reading.
fn create_samples_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS samples (
            signal_id  INTEGER NOT NULL REFERENCES signals(id) ON DELETE CASCADE,
            ts         TEXT NOT NULL,
            value      REAL,
            PRIMARY KEY (signal_id, ts)
        );
        "#,
    )?;
    Ok(())
}

/// Initialize the historian schema. Safe to call on an existing database.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    if !table_exists(conn, "signals")? {
        log::info!("Creating historian schema");
    }

    create_signals_table(conn)?;
    create_samples_table(conn)?;
    Ok(())
}
