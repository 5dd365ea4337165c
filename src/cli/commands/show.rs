use crate::cli::commands::open_guarded;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::store::{HistoryStore, SqliteStore};
use crate::errors::AppResult;
use crate::models::groups::NO_CLIENT;
use crate::utils::colors::{CYAN, RESET, colorize_optional};
use crate::utils::date::format_date;
use crate::utils::describe_status;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let pool = open_guarded(cfg)?;
        let rec = SqliteStore::new(&pool.conn).get(*id)?;

        let (status, status_color) = describe_status(rec.till);
        let to = if rec.till {
            "present".to_string()
        } else {
            format_date(rec.to, &cfg.date_format)
        };

        println!("{}#{}{} {} / {}", CYAN, rec.id, RESET, rec.employer, rec.position);
        println!(
            "  Client      : {}",
            colorize_optional(rec.client.as_deref().unwrap_or(NO_CLIENT))
        );
        println!("  From        : {}", format_date(Some(rec.from), &cfg.date_format));
        println!("  To          : {}", colorize_optional(&to));
        println!(
            "  Status      : {}{}{}",
            status_color,
            status,
            RESET
        );
        println!(
            "  Description : {}",
            colorize_optional(rec.description.as_deref().unwrap_or(""))
        );
        println!("  Created     : {}", rec.created_at);
        println!("  Updated     : {}", rec.updated_at);
    }
    Ok(())
}
