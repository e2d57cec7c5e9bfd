use std::path::Path;

use fcd_core::archive::{gunzip_file, gzip_file, tar_path, untar};

use crate::app::AppContext;
use crate::cli::ArchiveArgs;
use crate::errors::CliError;

pub fn handle_gzip(ctx: &AppContext, args: &ArchiveArgs) -> anyhow::Result<()> {
    let target = gzip_file(&args.source, &args.dest).map_err(CliError::from)?;
    print_written(ctx, "Compressed", &args.source, &target);
    Ok(())
}

pub fn handle_gunzip(ctx: &AppContext, args: &ArchiveArgs) -> anyhow::Result<()> {
    let target = gunzip_file(&args.source, &args.dest).map_err(CliError::from)?;
    print_written(ctx, "Decompressed", &args.source, &target);
    Ok(())
}

pub fn handle_tar(ctx: &AppContext, args: &ArchiveArgs) -> anyhow::Result<()> {
    let target = tar_path(&args.source, &args.dest).map_err(CliError::from)?;
    print_written(ctx, "Packed", &args.source, &target);
    Ok(())
}

pub fn handle_untar(ctx: &AppContext, args: &ArchiveArgs) -> anyhow::Result<()> {
    let entries = untar(&args.source, &args.dest).map_err(CliError::from)?;
    if !ctx.quiet() {
        println!(
            "Unpacked {} entries from {} into {}",
            entries, args.source, args.dest
        );
    }
    Ok(())
}

fn print_written(ctx: &AppContext, verb: &str, source: &str, target: &Path) {
    if !ctx.quiet() {
        println!("{} {} -> {}", verb, source, target.display());
    }
}
