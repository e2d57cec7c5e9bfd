//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, and clap usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const GENERAL: i32 = 1;

    /// Resource not found (source file, directory, mnemonic).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong mnemonic or secret, corrupted file).
    pub const AUTH_FAILED: i32 = 5;

    /// Output file already exists.
    pub const TARGET_EXISTS: i32 = 6;
}

/// Environment variable holding the secret when `-p` is omitted.
pub const ENV_SECRET: &str = "FCD_SECRET";

/// Environment variable overriding the config file location.
pub const ENV_CONFIG: &str = "FCD_CONFIG";
