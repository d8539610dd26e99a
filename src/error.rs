use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::id::{ParticipantId, WagerId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Settlement errors. All of them abort the closure with nothing written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    #[error("wagers for {date} were settled concurrently ({conflicting} already in ledger)")]
    AlreadySettled { date: NaiveDate, conflicting: usize },

    #[error("a daily record for {date} already exists")]
    AlreadyClosed { date: NaiveDate },

    #[error("{pending} wager(s) on {date} are still pending; resolve them before closing")]
    PendingWagers { date: NaiveDate, pending: usize },

    #[error("wagers on {date} changed while the day was being closed; retry")]
    BookChanged { date: NaiveDate },

    #[error("wager {0} not found")]
    UnknownWager(WagerId),

    #[error("participant {0} not found")]
    UnknownParticipant(ParticipantId),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Settlement(#[from] SettlementError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Error::Database(err.to_string())
    }
}
