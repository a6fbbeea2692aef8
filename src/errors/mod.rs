//! Error handling utilities for the habitlog application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Most parsing problems never reach these types: malformed rows, numbers and
//! config files degrade to "absent" or to defaults where they are read. What is
//! left is user input that must be rejected and backing files that cannot be
//! written.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents failures of the durable entry store or the export artifact.
///
/// # Examples
///
/// ```
/// use habitlog::errors::StoreError;
/// use std::io::{self, ErrorKind};
/// use std::path::PathBuf;
///
/// let error = StoreError::Write {
///     path: PathBuf::from("/data/tracker_data.csv"),
///     source: io::Error::new(ErrorKind::PermissionDenied, "permission denied"),
/// };
///
/// assert!(format!("{}", error).contains("tracker_data.csv"));
/// assert!(format!("{}", error).contains("permission denied"));
/// ```
#[derive(Debug, Error)]
pub enum StoreError {
    /// An existing store could not be read before a rewrite; nothing was written.
    #[error("Failed to read {path}: {source}. The file was left unchanged.")]
    Read {
        /// The store file that could not be read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing the store (or its temporary snapshot) failed.
    #[error("Failed to write {path}: {source}. Please check file permissions and available disk space.")]
    Write {
        /// The file that could not be written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Moving a finished snapshot over the store failed.
    #[error("Failed to replace {path} with the new snapshot: {source}")]
    Persist {
        /// The store file that was being replaced
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The CSV encoder rejected a record.
    #[error("CSV encoding error: {0}")]
    Csv(#[from] csv::Error),
}

/// Represents all possible errors that can occur in the habitlog application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use habitlog::errors::AppError;
///
/// let error = AppError::Config("Data directory path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Data directory path is empty");
/// ```
///
/// Converting from an IO error:
/// ```
/// use habitlog::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors writing the entry store or export artifact.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Rejected user input (bad date, out-of-range number, unknown selection).
    ///
    /// Operations that fail with this variant have not written anything.
    #[error("Invalid input: {0}")]
    Input(String),

    /// Errors saving the goal configuration or profile.
    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use habitlog::errors::{AppResult, AppError};
///
/// fn parse_hours(raw: &str) -> AppResult<f64> {
///     raw.parse::<f64>()
///         .map_err(|_| AppError::Input(format!("'{}' is not a number", raw)))
/// }
///
/// assert!(parse_hours("7.5").is_ok());
/// assert!(parse_hours("lots").is_err());
/// ```
pub type AppResult<T> = Result<T, AppError>;
