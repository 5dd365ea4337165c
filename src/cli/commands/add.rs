use crate::cli::commands::{cli_date, open_guarded};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::errors::{AppError, AppResult};
use crate::models::history::NewHistory;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        employer,
        position,
        client,
        from,
        to,
        till,
        description,
    } = cmd
    {
        //
        // 1️⃣ Parse dates before touching the session
        //
        let from = cli_date(Some(from))?.ok_or(AppError::MissingField("From date"))?;
        let to = cli_date(to.as_ref())?;

        let input = NewHistory {
            employer: employer.clone(),
            position: position.clone(),
            client: client.clone(),
            from: Some(from),
            to,
            till: *till,
            description: description.clone(),
        };

        //
        // 2️⃣ Guard + insert
        //
        let pool = open_guarded(cfg)?;
        let rec = AddLogic::apply(&pool.conn, &input)?;

        success(format!(
            "Added #{}: {} / {} ({})",
            rec.id,
            rec.employer,
            rec.position,
            rec.status_label()
        ));
    }
    Ok(())
}
