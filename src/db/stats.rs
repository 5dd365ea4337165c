use crate::db::pool::DbPool;
use crate::db::migrate::applied_versions;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) RECORD COUNTS
    //
    let (total, ongoing, employers): (i64, i64, i64) = pool.conn.query_row(
        "SELECT COUNT(*), IFNULL(SUM(till), 0), COUNT(DISTINCT employer) FROM employment_history",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;
    println!(
        "{}• Records:{} {}{}{} ({} ongoing, {} employers)",
        CYAN, RESET, GREEN, total, RESET, ongoing, employers
    );

    //
    // 3) DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT MIN(from_date) FROM employment_history",
            [],
            |row| row.get(0),
        )
        .optional()?
        .flatten();
    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT MAX(IFNULL(to_date, from_date)) FROM employment_history",
            [],
            |row| row.get(0),
        )
        .optional()?
        .flatten();

    let dash = format!("{GREY}--{RESET}");
    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", first.unwrap_or_else(|| dash.clone()));
    println!(
        "    to:   {}",
        if ongoing > 0 {
            "present".to_string()
        } else {
            last.unwrap_or(dash)
        }
    );

    //
    // 4) SCHEMA
    //
    let versions = applied_versions(&pool.conn)?;
    println!(
        "{}• Schema:{} {} migrations, latest {}",
        CYAN,
        RESET,
        versions.len(),
        versions.last().map(String::as_str).unwrap_or("--")
    );

    println!();
    Ok(())
}
