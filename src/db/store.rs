//! Record store: validated CRUD over `employment_history`.

use crate::core::validate::validate;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::history::{HistoryPatch, HistoryRecord, NewHistory, now_iso};
use rusqlite::Connection;

pub trait HistoryStore {
    fn fetch_all(&self) -> AppResult<Vec<HistoryRecord>>;
    fn get(&self, id: i64) -> AppResult<HistoryRecord>;
    fn create(&mut self, new: &NewHistory) -> AppResult<HistoryRecord>;
    fn update(&mut self, id: i64, patch: &HistoryPatch) -> AppResult<HistoryRecord>;
    /// Returns the removed record.
    fn delete(&mut self, id: i64) -> AppResult<HistoryRecord>;
}

pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl HistoryStore for SqliteStore<'_> {
    fn fetch_all(&self) -> AppResult<Vec<HistoryRecord>> {
        queries::load_all(self.conn)
    }

    fn get(&self, id: i64) -> AppResult<HistoryRecord> {
        queries::load_by_id(self.conn, id)?.ok_or(AppError::NotFound(id))
    }

    fn create(&mut self, new: &NewHistory) -> AppResult<HistoryRecord> {
        let valid = validate(new)?;
        let id = queries::insert_history(self.conn, &valid, &now_iso())?;
        self.get(id)
    }

    fn update(&mut self, id: i64, patch: &HistoryPatch) -> AppResult<HistoryRecord> {
        let current = self.get(id)?;
        let valid = validate(&patch.merge_into(&current))?;

        if queries::update_history(self.conn, id, &valid, &now_iso())? == 0 {
            return Err(AppError::NotFound(id));
        }
        self.get(id)
    }

    fn delete(&mut self, id: i64) -> AppResult<HistoryRecord> {
        let current = self.get(id)?;
        queries::delete_history(self.conn, id)?;
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn acme(from: &str, to: Option<&str>, till: bool) -> NewHistory {
        NewHistory {
            employer: "Acme".into(),
            position: "Developer".into(),
            client: None,
            from: Some(d(from)),
            to: to.map(d),
            till,
            description: None,
        }
    }

    #[test]
    fn create_and_fetch_orders_by_from_desc() {
        let pool = DbPool::in_memory().unwrap();
        let mut store = SqliteStore::new(&pool.conn);

        store.create(&acme("2018-01-01", Some("2019-01-01"), false)).unwrap();
        let second = store.create(&acme("2020-01-01", None, true)).unwrap();

        let all = store.fetch_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert!(all[0].till);
        assert_eq!(all[0].to, None);
    }

    #[test]
    fn invalid_create_writes_nothing() {
        let pool = DbPool::in_memory().unwrap();
        let mut store = SqliteStore::new(&pool.conn);

        let err = store
            .create(&acme("2020-01-01", Some("2019-01-01"), false))
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidDateRange { .. }));
        assert!(store.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn update_applies_patch_and_clears_fields() {
        let pool = DbPool::in_memory().unwrap();
        let mut store = SqliteStore::new(&pool.conn);

        let mut input = acme("2018-01-01", Some("2019-01-01"), false);
        input.client = Some("Initech".into());
        let rec = store.create(&input).unwrap();

        let patch = HistoryPatch {
            position: Some("Lead Developer".into()),
            client: Some(None),
            till: Some(true),
            ..HistoryPatch::default()
        };
        let updated = store.update(rec.id, &patch).unwrap();

        assert_eq!(updated.position, "Lead Developer");
        assert_eq!(updated.client, None);
        assert!(updated.till);
        assert_eq!(updated.to, None);
        assert_eq!(updated.employer, "Acme");
    }

    #[test]
    fn rejected_patch_leaves_record_untouched() {
        let pool = DbPool::in_memory().unwrap();
        let mut store = SqliteStore::new(&pool.conn);
        let rec = store
            .create(&acme("2018-01-01", Some("2019-01-01"), false))
            .unwrap();

        let patch = HistoryPatch {
            employer: Some("  ".into()),
            ..HistoryPatch::default()
        };
        assert!(store.update(rec.id, &patch).is_err());
        assert_eq!(store.get(rec.id).unwrap(), rec);
    }

    #[test]
    fn missing_ids_are_not_found() {
        let pool = DbPool::in_memory().unwrap();
        let mut store = SqliteStore::new(&pool.conn);

        assert!(matches!(store.get(42), Err(AppError::NotFound(42))));
        assert!(matches!(store.delete(42), Err(AppError::NotFound(42))));
        assert!(matches!(
            store.update(42, &HistoryPatch::default()),
            Err(AppError::NotFound(42))
        ));
    }

    #[test]
    fn delete_returns_removed_record() {
        let pool = DbPool::in_memory().unwrap();
        let mut store = SqliteStore::new(&pool.conn);
        let rec = store.create(&acme("2018-01-01", None, false)).unwrap();

        let removed = store.delete(rec.id).unwrap();
        assert_eq!(removed.id, rec.id);
        assert!(store.fetch_all().unwrap().is_empty());
    }
}
