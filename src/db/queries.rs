use crate::core::validate::ValidHistory;
use crate::errors::{AppError, AppResult};
use crate::models::history::HistoryRecord;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_HISTORY: &str = "SELECT id, employer, position, client, from_date, to_date, till,
        description, created_at, updated_at
   FROM employment_history";

fn parse_db_date(idx: usize, s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(s.to_string())),
        )
    })
}

pub fn map_row(row: &Row) -> Result<HistoryRecord> {
    let from_str: String = row.get("from_date")?;
    let to_str: Option<String> = row.get("to_date")?;

    let from = parse_db_date(4, &from_str)?;
    let to = match to_str.as_deref() {
        Some(s) if !s.is_empty() => Some(parse_db_date(5, s)?),
        _ => None,
    };

    Ok(HistoryRecord {
        id: row.get("id")?,
        employer: row.get("employer")?,
        position: row.get("position")?,
        client: row.get("client")?,
        from,
        to,
        till: row.get::<_, i32>("till")? == 1,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn fmt_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// All records, most recent start first.
pub fn load_all(conn: &Connection) -> AppResult<Vec<HistoryRecord>> {
    let mut stmt = conn.prepare(&format!("{SELECT_HISTORY} ORDER BY from_date DESC, id ASC"))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_by_id(conn: &Connection, id: i64) -> AppResult<Option<HistoryRecord>> {
    let mut stmt = conn.prepare(&format!("{SELECT_HISTORY} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn insert_history(conn: &Connection, v: &ValidHistory, now: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO employment_history
            (employer, position, client, from_date, to_date, till, description, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
        params![
            v.employer,
            v.position,
            v.client,
            fmt_date(v.from),
            v.to.map(fmt_date),
            if v.till { 1 } else { 0 },
            v.description,
            now,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Returns the number of rows touched (0 when the id does not exist).
pub fn update_history(conn: &Connection, id: i64, v: &ValidHistory, now: &str) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE employment_history
            SET employer = ?1, position = ?2, client = ?3, from_date = ?4, to_date = ?5,
                till = ?6, description = ?7, updated_at = ?8
          WHERE id = ?9",
        params![
            v.employer,
            v.position,
            v.client,
            fmt_date(v.from),
            v.to.map(fmt_date),
            if v.till { 1 } else { 0 },
            v.description,
            now,
            id,
        ],
    )?;
    Ok(n)
}

pub fn delete_history(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM employment_history WHERE id = ?1", [id])?;
    Ok(n)
}
