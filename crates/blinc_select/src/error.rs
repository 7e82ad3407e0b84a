//! Error types for blinc_select
//!
//! State transitions never fail: unknown option ids, disallowed clicks and
//! exhausted navigation are no-ops. Errors only come from the edges where
//! configuration is parsed.

use thiserror::Error;

/// Errors that can occur while configuring a select widget
#[derive(Error, Debug)]
pub enum SelectError {
    /// Configuration or native control description could not be parsed
    #[error("Invalid select configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration parsed but describes an unusable widget
    #[error("Invalid select configuration: {0}")]
    Invalid(String),
}

/// Result type for select configuration operations
pub type Result<T> = std::result::Result<T, SelectError>;
