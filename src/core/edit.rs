use crate::db::log::audit;
use crate::db::store::{HistoryStore, SqliteStore};
use crate::errors::AppResult;
use crate::models::history::{HistoryPatch, HistoryRecord};
use rusqlite::Connection;

pub struct EditLogic;

impl EditLogic {
    /// Patch a record. The merged record is validated as a whole, so a
    /// rejected patch leaves the row untouched.
    pub fn apply(conn: &Connection, id: i64, patch: &HistoryPatch) -> AppResult<HistoryRecord> {
        let mut store = SqliteStore::new(conn);
        let rec = store.update(id, patch)?;

        audit(
            conn,
            "edit",
            &format!("#{}", rec.id),
            &format!("{} / {}", rec.employer, rec.position),
        )?;

        Ok(rec)
    }
}
