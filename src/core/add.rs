use crate::db::log::audit;
use crate::db::store::{HistoryStore, SqliteStore};
use crate::errors::AppResult;
use crate::models::history::{HistoryRecord, NewHistory};
use rusqlite::Connection;

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    pub fn apply(conn: &Connection, input: &NewHistory) -> AppResult<HistoryRecord> {
        let mut store = SqliteStore::new(conn);
        let rec = store.create(input)?;

        audit(
            conn,
            "add",
            &format!("#{}", rec.id),
            &format!("{} / {}", rec.employer, rec.position),
        )?;

        Ok(rec)
    }
}
