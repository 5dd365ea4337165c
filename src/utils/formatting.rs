//! Formatting utilities used for CLI and export outputs.

use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Pad to a display width (wide glyphs count double).
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

/// Cut a string to `max` display columns, appending "…" when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw + 1 > max {
            break;
        }
        out.push(ch);
        used += cw;
    }
    out.push('…');
    out
}

/// Label and ANSI color for the ongoing flag.
pub fn describe_status(till: bool) -> (String, &'static str) {
    if till {
        ("Present".into(), "\x1b[32m")
    } else {
        ("Past".into(), "\x1b[0m")
    }
}
