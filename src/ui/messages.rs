use std::fmt;
use std::io::{self, Write};

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_CLOCK: &str = "⏳";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", FG_RED, BOLD, ICON_ERR, RESET, msg);
}

/// Session warning banner, printed when the inactivity window is closing.
pub fn session_warning(remaining_minutes: i64) {
    println!(
        "{}{}{} Your session will expire in {} minute{} due to inactivity.{}",
        FG_YELLOW,
        BOLD,
        ICON_CLOCK,
        remaining_minutes,
        if remaining_minutes == 1 { "" } else { "s" },
        RESET
    );
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` means no.
pub fn confirm<T: fmt::Display>(question: T) -> io::Result<bool> {
    print!("{} [y/N]: ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    Ok(ans == "y" || ans == "yes")
}
