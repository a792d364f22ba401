//! Error types for tracker-session

use thiserror::Error;
use tracker_core::{StoreError, SubstrateError};

use crate::config::ConfigError;

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors raised while opening or switching a session.
///
/// Mutations on individual stores keep returning [`StoreError`].
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Substrate error: {0}")]
    Substrate(#[from] SubstrateError),

    /// No database path configured and no platform data directory
    #[error("No location for the database file")]
    NoDatabasePath,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
