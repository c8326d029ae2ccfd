use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `proctor` binary.
#[derive(Debug, Parser)]
#[command(
    name = "proctor",
    version,
    about = "Proctor - exam session integrity records"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::SessionCommands;
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["proctor", "--format", "raw", "--verbose", "status"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["proctor", "session", "list", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Session {
                action: SessionCommands::List
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["proctor", "--format", "table", "status"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn session_get_takes_raw_id() {
        let cli = Cli::try_parse_from(["proctor", "session", "get", "1700000000000"])
            .expect("cli should parse");
        match cli.command {
            Commands::Session {
                action: SessionCommands::Get { id },
            } => assert_eq!(id, "1700000000000"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn classify_requires_input_file() {
        assert!(Cli::try_parse_from(["proctor", "classify"]).is_err());

        let cli = Cli::try_parse_from(["proctor", "classify", "frame.json"])
            .expect("cli should parse");
        match cli.command {
            Commands::Classify(args) => {
                assert_eq!(args.input.to_str(), Some("frame.json"));
                assert!(args.keywords.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn classify_keyword_override_is_repeatable() {
        let cli = Cli::try_parse_from([
            "proctor", "classify", "-", "--keyword", "tablet", "--keyword", "watch",
        ])
        .expect("cli should parse");
        match cli.command {
            Commands::Classify(args) => assert_eq!(args.keywords, vec!["tablet", "watch"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
