use std::path::{Path, PathBuf};

use fcd_core::file::DEFAULT_ENCRYPTED_SUFFIX;
use fcd_core::mnemonic::DEFAULT_MNEMONIC_DIR;
use serde::{Deserialize, Serialize};

use crate::constants::ENV_CONFIG;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FcdConfig {
    #[serde(default)]
    pub mnemonic: MnemonicSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MnemonicSection {
    /// Directory searched for bare mnemonic names
    pub dir: String,
    /// Mnemonic used when neither `-m` nor `FCD_MNEMONIC` is given
    pub default: Option<String>,
}

impl Default for MnemonicSection {
    fn default() -> Self {
        Self {
            dir: DEFAULT_MNEMONIC_DIR.to_string(),
            default: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub encrypted_suffix: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            encrypted_suffix: DEFAULT_ENCRYPTED_SUFFIX.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Resolve the config file: `--config`, then `FCD_CONFIG`, then XDG.
pub fn config_path(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Ok(value) = std::env::var(ENV_CONFIG) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

/// Load the config at `path`, falling back to defaults if it does not exist.
pub fn load_config(path: &Path) -> anyhow::Result<FcdConfig> {
    if !path.exists() {
        return Ok(FcdConfig::default());
    }
    read_config(path)
}

pub fn read_config(path: &Path) -> anyhow::Result<FcdConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("fcd"));
        }
    }
    Ok(home_dir()?.join(".config").join("fcd"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
