use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use fcd_core::VERSION;

/// fcd - encrypt files at rest with a mnemonic phrase and a secret
#[derive(Parser)]
#[command(name = "fcd")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compress and encrypt a file
    Encrypt(CryptArgs),

    /// Decrypt and decompress a file
    Decrypt(CryptArgs),

    /// Compress a file with gzip
    Gzip(ArchiveArgs),

    /// Decompress a gzip file
    Gunzip(ArchiveArgs),

    /// Pack a file or directory into a tar archive
    Tar(ArchiveArgs),

    /// Unpack a tar archive
    Untar(ArchiveArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct CryptArgs {
    /// File to read
    #[arg(short, long, value_name = "SOURCE")]
    pub source: String,

    /// File to write (must not exist)
    #[arg(short, long, value_name = "TARGET")]
    pub target: Option<String>,

    /// Mnemonic file, by path or by name under the mnemonic directory
    #[arg(short, long, value_name = "MNEMONIC", env = "FCD_MNEMONIC")]
    pub mnemonic: Option<String>,

    /// Secret combined with the mnemonic (prompted if omitted)
    #[arg(short = 'p', long, value_name = "SECRET")]
    pub secret: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

#[derive(Args)]
pub struct ArchiveArgs {
    /// File or directory to read
    #[arg(short, long, value_name = "SOURCE")]
    pub source: String,

    /// Directory to write into
    #[arg(short, long = "dest", value_name = "DEST_DIR")]
    pub dest: String,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_encrypt() {
        let cli = Cli::try_parse_from([
            "fcd", "-vv", "encrypt", "-s", "notes.txt", "-m", "personal", "-p", "hunter2",
        ])
        .expect("parse");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Encrypt(args) => {
                assert_eq!(args.source, "notes.txt");
                assert!(args.target.is_none());
                assert_eq!(args.mnemonic.as_deref(), Some("personal"));
                assert_eq!(args.secret.as_deref(), Some("hunter2"));
                assert!(!args.no_input);
            }
            _ => panic!("expected encrypt"),
        }
    }

    #[test]
    fn test_parse_archive() {
        let cli = Cli::try_parse_from(["fcd", "untar", "-s", "a.tar", "-d", "out", "-q"])
            .expect("parse");
        assert!(cli.quiet);
        match cli.command {
            Commands::Untar(args) => {
                assert_eq!(args.source, "a.tar");
                assert_eq!(args.dest, "out");
            }
            _ => panic!("expected untar"),
        }
    }

    #[test]
    fn test_source_is_required() {
        assert!(Cli::try_parse_from(["fcd", "decrypt", "-m", "x"]).is_err());
    }
}
