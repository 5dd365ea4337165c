use crate::cli::commands::open_guarded;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::store::{HistoryStore, SqliteStore};
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let pool = open_guarded(cfg)?;

        // NotFound before asking anything
        let rec = SqliteStore::new(&pool.conn).get(*id)?;

        if !*yes {
            let question = format!(
                "Delete #{} {} / {} ({} → {})?",
                rec.id,
                rec.employer,
                rec.position,
                rec.from_date_str(),
                if rec.till {
                    "present".to_string()
                } else {
                    rec.to_date_str()
                }
            );
            if !confirm(question)? {
                info("Deletion cancelled.");
                return Ok(());
            }
        }

        let removed = DeleteLogic::apply(&pool.conn, *id)?;
        success(format!(
            "Deleted #{}: {} / {}",
            removed.id, removed.employer, removed.position
        ));
    }
    Ok(())
}
