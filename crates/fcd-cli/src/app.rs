//! Application context: the parsed CLI plus the resolved config.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{config_path, load_config, FcdConfig};

pub struct AppContext {
    pub config: FcdConfig,
    config_path: PathBuf,
    quiet: bool,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let path = config_path(cli.config.as_deref())?;
        let config = load_config(&path)?;
        Ok(Self {
            config,
            config_path: path,
            quiet: cli.quiet,
        })
    }

    /// The config file consulted, whether or not it exists.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Whether prompts may be shown.
    pub fn interactive(&self, no_input: bool) -> bool {
        std::io::stdin().is_terminal() && !no_input
    }
}
