use crate::db::log::audit;
use crate::db::store::{HistoryStore, SqliteStore};
use crate::errors::AppResult;
use crate::models::history::HistoryRecord;
use rusqlite::Connection;

pub struct DeleteLogic;

impl DeleteLogic {
    pub fn apply(conn: &Connection, id: i64) -> AppResult<HistoryRecord> {
        let mut store = SqliteStore::new(conn);
        let removed = store.delete(id)?;

        audit(
            conn,
            "del",
            &format!("#{}", removed.id),
            &format!("{} / {}", removed.employer, removed.position),
        )?;

        Ok(removed)
    }
}
