use crate::errors::{AppError, AppResult};
use crate::models::{Sample, SeriesInfo};
use crate::utils::date::{STORAGE_FORMAT, format_datetime};
use chrono::NaiveDateTime;
use rusqlite::{Connection, Result, Row, params};

pub fn insert_signal(conn: &Connection, name: &str, description: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO signals (name, description) VALUES (?1, ?2)",
        params![name, description],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert (or overwrite) samples of a signal inside a single transaction.
pub fn insert_samples(conn: &mut Connection, signal_id: i64, samples: &[Sample]) -> Result<usize> {
    let tx = conn.transaction()?;
    let mut written = 0;
    {
        let mut stmt = tx.prepare_cached(
            "INSERT OR REPLACE INTO samples (signal_id, ts, value)
             VALUES (?1, ?2, ?3)",
        )?;

        for s in samples {
            written += stmt.execute(params![
                signal_id,
                format_datetime(&s.timestamp),
                s.value.filter(|v| !v.is_nan())
            ])?;
        }
    }
    tx.commit()?;
    Ok(written)
}

pub fn search_signals(conn: &Connection, name: &str) -> AppResult<Vec<SeriesInfo>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description FROM signals
         WHERE instr(lower(name), lower(?1)) > 0
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([name], map_signal)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_signal(row: &Row) -> Result<SeriesInfo> {
    let id: i64 = row.get("id")?;
    let name: String = row.get("name")?;
    let description: String = row.get("description")?;
    Ok(SeriesInfo::new(id.to_string(), name).with_description(description))
}

pub fn load_samples(
    conn: &Connection,
    signal_id: i64,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> AppResult<Vec<Sample>> {
    let mut stmt = conn.prepare(
        "SELECT ts, value FROM samples
         WHERE signal_id = ?1 AND ts >= ?2 AND ts <= ?3
         ORDER BY ts ASC",
    )?;

    let rows = stmt.query_map(
        params![signal_id, format_datetime(&start), format_datetime(&end)],
        map_sample,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_sample(row: &Row) -> Result<Sample> {
    let ts_str: String = row.get("ts")?;
    let value: Option<f64> = row.get("value")?;

    let ts = NaiveDateTime::parse_from_str(&ts_str, STORAGE_FORMAT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(ts_str.clone())),
        )
    })?;

    Ok(Sample::new(ts, value))
}
