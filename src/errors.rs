//! Unified application error type.
//! All modules (api, db, core, cli, utils) return AppError to keep the error
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
    // Local storage
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Remote API
    // ---------------------------
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("Session expired due to inactivity, please log in again")]
    SessionExpired,

    #[error("Please login first!")]
    NotLoggedIn,

    #[error("Admin token missing, please log in as admin")]
    AdminNotLoggedIn,

    #[error("Cannot edit a verified record: {0}")]
    VerifiedRecordLocked(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    // ---------------------------
    // Parsing / validation
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Invalid field assignment: {0} (expected field=value)")]
    InvalidAssignment(String),

    #[error("Invalid filter: {0} (expected field~text)")]
    InvalidFilter(String),

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    Validation(Vec<String>),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
