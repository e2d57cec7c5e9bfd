//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use fcd_core::FcdError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (source file, mnemonic, directory)
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong mnemonic or secret)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// The output path is already taken
    TargetExists(String),

    /// Anything else the core reports
    Other(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::TargetExists(message) => write!(f, "{}", message),
            CliError::Other(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::TargetExists(_) => exit_codes::TARGET_EXISTS,
            CliError::Other(_) => exit_codes::GENERAL,
        }
    }
}

impl From<FcdError> for CliError {
    fn from(err: FcdError) -> Self {
        if err.is_wrong_key() {
            return CliError::auth_failed_with_hint(
                "Decryption failed: wrong mnemonic or secret, or the file is corrupted.",
                "Hint: Check the mnemonic and secret used to encrypt this file.",
            );
        }
        let message = err.to_string();
        match err {
            FcdError::NotFound(_) => {
                CliError::not_found(message, "Hint: Check the path and try again.")
            }
            FcdError::KeyDerivationInput(_) => CliError::not_found(
                message,
                "Hint: Pass -m with a path, or a name under the mnemonic directory.",
            ),
            FcdError::ShortIvRead { .. } => {
                CliError::invalid_input(format!("Not an encrypted file: {}", message))
            }
            FcdError::InvalidInput(_) | FcdError::Archive(_) => CliError::invalid_input(message),
            FcdError::TargetExists(_) => CliError::TargetExists(message),
            FcdError::CipherConstruction(_)
            | FcdError::CompressionFormat { .. }
            | FcdError::Io { .. } => CliError::Other(message),
        }
    }
}

/// Exit code for any error surfaced from a command.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    exit_codes::GENERAL
}
