//! Persisted list view state: sort selection and employer expand/collapse.

use crate::core::view::ExpansionPrefs;
use crate::errors::AppResult;
use crate::models::sort::{SortDirection, SortField, SortState};
use rusqlite::{Connection, OptionalExtension, params};

fn get_pref(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    Ok(conn
        .query_row("SELECT value FROM view_prefs WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?)
}

fn set_pref(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO view_prefs (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Unknown stored values fall back to "no sort".
pub fn load_sort_state(conn: &Connection) -> AppResult<SortState> {
    let field = get_pref(conn, "sort_field")?.and_then(|s| SortField::from_db_str(&s));
    let direction = get_pref(conn, "sort_direction")?
        .and_then(|s| SortDirection::from_db_str(&s))
        .unwrap_or_default();

    Ok(SortState { field, direction })
}

pub fn save_sort_state(conn: &Connection, sort: &SortState) -> AppResult<()> {
    let field = sort.field.map(|f| f.to_db_str()).unwrap_or("");
    set_pref(conn, "sort_field", field)?;
    set_pref(conn, "sort_direction", sort.direction.to_db_str())?;
    Ok(())
}

pub fn load_expansion(conn: &Connection) -> AppResult<ExpansionPrefs> {
    let mut stmt = conn.prepare("SELECT employer, expanded FROM employer_view ORDER BY employer")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i32>(1)? == 1))
    })?;

    let mut entries = Vec::new();
    for r in rows {
        entries.push(r?);
    }
    Ok(ExpansionPrefs::from_entries(entries))
}

pub fn save_expansion(conn: &Connection, prefs: &ExpansionPrefs) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO employer_view (employer, expanded) VALUES (?1, ?2)
             ON CONFLICT(employer) DO UPDATE SET expanded = excluded.expanded",
        )?;
        for (employer, expanded) in prefs.entries() {
            stmt.execute(params![employer, if expanded { 1 } else { 0 }])?;
        }
    }
    tx.commit()?;
    Ok(())
}
