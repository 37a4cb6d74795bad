pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sealbox")]
#[command(about = "Seal files for a recipient's P-256 public key, entirely offline")]
pub struct Args {
    /// Path to the sealbox config directory (defaults to ~/.sealbox)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG overrides it
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: crate::Command,
}
