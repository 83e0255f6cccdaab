//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`MalformedRecord`] thrown when a stored record carries an amount, date
//!   or enum value that cannot be parsed.
//! - [`Validation`] thrown when input fields are missing or out of range.
//! - [`KeyNotFound`] thrown when an item is not found.
//! - [`Store`] thrown when the record store itself fails.
//!
//!  [`MalformedRecord`]: EngineError::MalformedRecord
//!  [`Validation`]: EngineError::Validation
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Store`]: EngineError::Store
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid credentials")]
    Unauthorized,
    #[error("Export failed: {0}")]
    Export(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Store(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MalformedRecord(a), Self::MalformedRecord(b)) => a == b,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Unauthorized, Self::Unauthorized) => true,
            (Self::Export(a), Self::Export(b)) => a == b,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            (Self::Store(a), Self::Store(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

impl From<csv::Error> for EngineError {
    fn from(value: csv::Error) -> Self {
        Self::Export(value.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(value: serde_json::Error) -> Self {
        Self::Export(value.to_string())
    }
}
