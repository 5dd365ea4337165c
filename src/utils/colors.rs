/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Ongoing records are green, closed ones are left uncolored.
pub fn color_for_status(till: bool) -> &'static str {
    if till { GREEN } else { RESET }
}

/// Color used for an operation in the internal log.
pub fn color_for_operation(op: &str) -> &'static str {
    match op {
        "add" => GREEN,
        "del" | "expired" => RED,
        "edit" => YELLOW,
        "login" | "logout" => CYAN,
        "migration_applied" => MAGENTA,
        "backup" | "export" => BLUE,
        _ => RESET,
    }
}

/// Grey placeholder for empty values.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "-" {
        format!("{GREY}-{RESET}")
    } else {
        value.to_string()
    }
}
