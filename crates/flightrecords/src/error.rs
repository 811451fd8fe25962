//! Error types for flightrecords.
//!
//! This module defines all error types used throughout the flightrecords crate.
//! Domain errors (`NotFound`, `InvalidField`, `AlreadyAssigned`, ...) are
//! reported to the operator and never end a session; storage and configuration
//! errors fail only the operation that hit them.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for flightrecords operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Domain Errors ===
    /// A record with the given key does not exist.
    #[error("{entity} {key} not found")]
    NotFound {
        /// Kind of record that was looked up.
        entity: &'static str,
        /// The key that was not found.
        key: String,
    },

    /// A column name outside the recognized set was supplied.
    #[error("'{field}' is not a recognized {entity} field")]
    InvalidField {
        /// Table the field was looked up against.
        entity: &'static str,
        /// The rejected field name.
        field: String,
    },

    /// A value could not be converted to the type its column holds.
    #[error("invalid value '{value}' for {field}: expected {expected}")]
    InvalidValue {
        /// Column the value was meant for.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// Description of the accepted form.
        expected: &'static str,
    },

    /// The pilot already has an assignment on this flight.
    #[error("pilot {pilot_id} is already assigned to flight {flight_id}")]
    AlreadyAssigned {
        /// Flight of the existing assignment.
        flight_id: i64,
        /// Pilot of the existing assignment.
        pilot_id: i64,
    },

    /// The flight already has a Captain.
    #[error("flight {flight_id} already has a Captain")]
    CaptainAlreadyAssigned {
        /// Flight that already has a Captain.
        flight_id: i64,
    },

    /// A flight with this id already exists.
    #[error("flight id {0} is already in use")]
    FlightIdTaken(i64),

    /// A reference record with this key already exists.
    #[error("{entity} {key} already exists")]
    Duplicate {
        /// Kind of record.
        entity: &'static str,
        /// The duplicated key.
        key: String,
    },

    /// A crew role or pilot rank string was not recognized.
    #[error("invalid role '{0}': expected 'Captain' or 'First Officer'")]
    InvalidRole(String),

    /// Operator input could not be interpreted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to initialize or upgrade the schema.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for flightrecords operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for the given record kind and key.
    #[must_use]
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Create a duplicate-key error for the given record kind and key.
    #[must_use]
    pub fn duplicate(entity: &'static str, key: impl ToString) -> Self {
        Self::Duplicate {
            entity,
            key: key.to_string(),
        }
    }

    /// Create an invalid-input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Check if this error is a missing-record error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error is a rejected operator request rather than a
    /// storage, I/O or configuration failure.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::InvalidField { .. }
                | Self::InvalidValue { .. }
                | Self::AlreadyAssigned { .. }
                | Self::CaptainAlreadyAssigned { .. }
                | Self::FlightIdTaken(_)
                | Self::Duplicate { .. }
                | Self::InvalidRole(_)
                | Self::InvalidInput(_)
        )
    }
}
