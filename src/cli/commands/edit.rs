use crate::cli::commands::{cli_date, open_guarded};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::edit::EditLogic;
use crate::errors::{AppError, AppResult};
use crate::models::history::HistoryPatch;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        employer,
        position,
        client,
        from,
        to,
        till,
        no_till,
        description,
        clear_client,
        clear_to,
        clear_desc,
    } = cmd
    {
        let from = match from {
            Some(f) => Some(cli_date(Some(f))?.ok_or(AppError::MissingField("From date"))?),
            None => None,
        };

        let patch = HistoryPatch {
            employer: employer.clone(),
            position: position.clone(),
            client: if *clear_client {
                Some(None)
            } else {
                client.clone().map(Some)
            },
            from,
            to: if *clear_to {
                Some(None)
            } else {
                cli_date(to.as_ref())?.map(Some)
            },
            till: match (*till, *no_till) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
            description: if *clear_desc {
                Some(None)
            } else {
                description.clone().map(Some)
            },
        };

        if patch.is_empty() {
            warning("Nothing to update: pass at least one field to change.");
            return Ok(());
        }

        let pool = open_guarded(cfg)?;
        let rec = EditLogic::apply(&pool.conn, *id, &patch)?;

        success(format!(
            "Updated #{}: {} / {} ({})",
            rec.id,
            rec.employer,
            rec.position,
            rec.status_label()
        ));
    }
    Ok(())
}
