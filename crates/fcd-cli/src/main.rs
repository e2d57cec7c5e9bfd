//! fcd CLI - encrypt files at rest with a mnemonic phrase and a secret
//!
//! This is the command-line interface for fcd. It wires argument parsing,
//! configuration, and logging around the core library.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;

use clap::Parser;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{archive, crypt, misc};
use crate::errors::exit_code_for;
use crate::logging::{init_logging, level_for};

fn main() {
    let cli = Cli::parse();

    let result = AppContext::new(&cli).and_then(|ctx| {
        init_logging(&level_for(cli.verbose, cli.quiet, &ctx.config.log.level));
        debug!(
            config = %ctx.config_path().display(),
            found = ctx.config_path().exists(),
            "resolved config"
        );
        run(&ctx, &cli)
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code_for(&e));
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Encrypt(args) => crypt::handle_encrypt(ctx, args),
        Commands::Decrypt(args) => crypt::handle_decrypt(ctx, args),
        Commands::Gzip(args) => archive::handle_gzip(ctx, args),
        Commands::Gunzip(args) => archive::handle_gunzip(ctx, args),
        Commands::Tar(args) => archive::handle_tar(ctx, args),
        Commands::Untar(args) => archive::handle_untar(ctx, args),
        Commands::Completions(args) => misc::handle_completions(args),
    }
}
