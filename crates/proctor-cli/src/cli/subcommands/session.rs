use std::path::PathBuf;

use clap::Subcommand;

/// Session record commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SessionCommands {
    /// Save a completed session summary (JSON file, `-` reads stdin).
    Save {
        /// Session summary in the client payload shape.
        input: PathBuf,
    },
    /// List every stored session.
    List,
    /// Get one session by native id or numeric id.
    Get {
        /// `ses-…` id, or a numeric id from fallback mode.
        id: String,
    },
    /// Write every stored session to a JSONL snapshot.
    Export {
        /// Output path.
        output: PathBuf,
    },
    /// Import a JSONL snapshot into the durable backend.
    Import {
        /// Snapshot written by `session export`.
        input: PathBuf,
    },
}
