//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Employment history #{0} not found")]
    NotFound(i64),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} is too long ({len} chars, max {max})")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("To date ({to}) must be after From date ({from})")]
    InvalidDateRange { from: String, to: String },

    #[error("Invalid sort field: {0} (use employer, position, from, to, client)")]
    InvalidSortField(String),

    #[error("Invalid status filter: {0} (use all, current, past)")]
    InvalidStatus(String),

    // ---------------------------
    // Auth / session errors
    // ---------------------------
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not logged in. Run `rworkhistory login` first")]
    NotLoggedIn,

    #[error("Your session has expired due to inactivity. You have been logged out")]
    SessionExpired,

    #[error("Invalid session settings: {0}")]
    InvalidSessionSettings(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
