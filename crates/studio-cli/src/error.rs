//! # CLI Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Usage          bad flags                              exit 64          │
//! │  Configuration  InvalidConfig, ConfigParse, I/O        exit 78          │
//! │  Input          InputParse                             exit 65          │
//! │  Quote          bad request (Validation)               exit 65          │
//! │                 rate table / overflow fault            exit 78          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use studio_core::QuoteError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Unknown flag or missing flag value.
    #[error("{0}")]
    Usage(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid quote configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // =========================================================================
    // Input Errors
    // =========================================================================
    /// The quote request or rate table was not valid JSON for its type.
    #[error("Invalid JSON: {0}")]
    InputParse(#[from] serde_json::Error),

    // =========================================================================
    // Engine Errors
    // =========================================================================
    #[error("{0}")]
    Quote(#[from] QuoteError),
}

impl CliError {
    /// Process exit code, following the BSD `sysexits` conventions.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 64,
            CliError::InputParse(_) => 65,
            CliError::Quote(e) if e.is_client_error() => 65,
            CliError::Quote(_) => 78,
            CliError::InvalidConfig(_) | CliError::ConfigParse(_) | CliError::Io(_) => 78,
        }
    }
}
