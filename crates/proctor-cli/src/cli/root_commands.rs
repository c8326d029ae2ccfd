use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::SessionCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Filter a frame's detections down to suspicious objects.
    Classify(ClassifyArgs),
    /// Session integrity records.
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },
    /// Show the resolved storage mode and record count.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct ClassifyArgs {
    /// JSON file holding an array of detections (`-` reads stdin).
    pub input: PathBuf,

    /// Replace the configured keyword set (repeatable).
    #[arg(long = "keyword")]
    pub keywords: Vec<String>,
}
