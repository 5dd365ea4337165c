use crate::db::log::{LogEntry, load_log};
use crate::errors::AppResult;
use crate::utils::colors::{RESET, color_for_operation};
use crate::utils::formatting::{pad_right, truncate};
use rusqlite::Connection;
use unicode_width::UnicodeWidthStr;

const OP_MAX: usize = 60;

/// Operation plus target, as shown in the log listing.
fn op_target(e: &LogEntry) -> String {
    if e.target.is_empty() {
        e.operation.clone()
    } else {
        format!("{} ({})", e.operation, e.target)
    }
}

/// Colour only the operation word of an (already truncated) label.
fn paint(label: &str, operation: &str) -> String {
    let color = color_for_operation(operation);
    match label.split_once(' ') {
        Some((op, rest)) => format!("{color}{op}{RESET} {rest}"),
        None => format!("{color}{label}{RESET}"),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let entries = load_log(conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let date_of = |e: &LogEntry| {
            chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| e.date.clone())
        };

        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let date_w = entries.iter().map(|e| date_of(e).len()).max().unwrap_or(10);
        // larghezza max op+target, limitata a 60
        let op_w = entries
            .iter()
            .map(|e| op_target(e).width())
            .max()
            .unwrap_or(10)
            .min(OP_MAX);

        println!("📜 Internal log:\n");

        for e in &entries {
            let label = truncate(&op_target(e), OP_MAX);
            // padding calcolato sul testo senza ANSI
            let padded = pad_right(&label, op_w);
            let padding = &padded[label.len()..];

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                date_of(e),
                paint(&label, &e.operation),
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
