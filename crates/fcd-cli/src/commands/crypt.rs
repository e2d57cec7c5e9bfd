use std::path::Path;

use fcd_core::file::{default_decrypted_target, default_encrypted_target};
use fcd_core::{decrypt_file, encrypt_file, FileReport, KeySource};
use tracing::debug;

use crate::app::AppContext;
use crate::cli::CryptArgs;
use crate::errors::CliError;
use crate::helpers::{resolve_mnemonic, resolve_secret};

pub fn handle_encrypt(ctx: &AppContext, args: &CryptArgs) -> anyhow::Result<()> {
    let target = match &args.target {
        Some(target) => target.clone(),
        None => {
            let suffix = &ctx.config.output.encrypted_suffix;
            let inferred = default_encrypted_target(Path::new(&args.source), suffix);
            let inferred = inferred.to_string_lossy().to_string();
            if !ctx.quiet() {
                eprintln!("No target given; writing to {}", inferred);
            }
            inferred
        }
    };

    let keys = key_source(ctx, args)?;
    let report = encrypt_file(&args.source, &target, &keys).map_err(CliError::from)?;
    print_report(ctx, "Encrypted", &report);
    Ok(())
}

pub fn handle_decrypt(ctx: &AppContext, args: &CryptArgs) -> anyhow::Result<()> {
    let target = match &args.target {
        Some(target) => target.clone(),
        None => {
            let suffix = &ctx.config.output.encrypted_suffix;
            let inferred = default_decrypted_target(Path::new(&args.source), suffix)
                .map_err(CliError::from)?
                .to_string_lossy()
                .to_string();
            debug!(inferred = %inferred, "inferred decryption target");
            inferred
        }
    };

    let keys = key_source(ctx, args)?;
    let report = decrypt_file(&args.source, &target, &keys).map_err(CliError::from)?;
    print_report(ctx, "Decrypted", &report);
    Ok(())
}

fn key_source(ctx: &AppContext, args: &CryptArgs) -> anyhow::Result<KeySource> {
    let mnemonic = resolve_mnemonic(args.mnemonic.as_deref(), &ctx.config)?;
    let secret = resolve_secret(args.secret.as_deref(), ctx.interactive(args.no_input))?;
    debug!(mnemonic = %mnemonic, mnemonic_dir = %ctx.config.mnemonic.dir, "key source");
    Ok(KeySource::new(mnemonic, secret.as_str()).with_mnemonic_dir(&ctx.config.mnemonic.dir))
}

fn print_report(ctx: &AppContext, verb: &str, report: &FileReport) {
    if ctx.quiet() {
        return;
    }
    println!(
        "{} {} -> {} ({} bytes)",
        verb,
        report.source.display(),
        report.target.display(),
        report.bytes
    );
}
