//! Input helpers for the mnemonic reference and the secret.

use dialoguer::Password;
use zeroize::Zeroizing;

use crate::config::FcdConfig;
use crate::constants::ENV_SECRET;
use crate::errors::CliError;

/// Pick the mnemonic reference: `-m` (or `FCD_MNEMONIC`), then the config default.
pub fn resolve_mnemonic(arg: Option<&str>, config: &FcdConfig) -> anyhow::Result<String> {
    arg.or(config.mnemonic.default.as_deref())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            CliError::invalid_input(
                "No mnemonic specified. Pass -m, set FCD_MNEMONIC, or set mnemonic.default in the config.",
            )
            .into()
        })
}

/// Pick the secret: `-p`, then `FCD_SECRET`, then a prompt if interactive.
///
/// Without a TTY the secret is empty, which is a valid (if weak) input.
pub fn resolve_secret(arg: Option<&str>, interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = arg {
        return Ok(Zeroizing::new(value.to_string()));
    }
    if let Ok(value) = std::env::var(ENV_SECRET) {
        if !value.trim().is_empty() {
            return Ok(Zeroizing::new(value));
        }
    }
    if !interactive {
        return Ok(Zeroizing::new(String::new()));
    }
    Password::new()
        .with_prompt("Secret")
        .allow_empty_password(true)
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read secret: {}", e))
}
