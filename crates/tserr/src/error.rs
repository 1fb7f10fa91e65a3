//! Error types for tserr operations.
//!
//! This module provides the main error type [`TsErrError`]. Parsing itself
//! never fails: unmatched messages are dropped and unreadable explanations
//! become `null`. Errors only arise while setting up, for example when a
//! template registry file cannot be read.

use std::io;

use thiserror::Error;

use crate::registry::RegistryError;

/// The main error type for tserr operations.
#[derive(Debug, Error)]
pub enum TsErrError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Configuration error: {0}")]
    Config(String),
}
