use crate::cli::commands::open_guarded;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::store::{HistoryStore, SqliteStore};
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let pool = open_guarded(cfg)?;
        let records = SqliteStore::new(&pool.conn).fetch_all()?;
        ExportLogic::export(&pool.conn, &records, *format, file, *force)?;
    }
    Ok(())
}
