use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat, ProgressMode};
pub use root_commands::Commands;

/// Top-level CLI parser for the `prism` binary.
#[derive(Debug, Parser)]
#[command(
    name = "prism",
    version,
    about = "Prism - query, export, and aggregate LLM request analytics"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Color output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Progress display: auto, on, off
    #[arg(long, global = true, default_value = "auto")]
    pub progress: ProgressMode,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color,
            progress: self.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["prism", "--format", "json", "--verbose", "auth", "status"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Auth { .. }));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["prism", "auth", "status", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["prism", "--format", "xml", "auth", "status"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn requests_list_accepts_filter_flags() {
        let cli = Cli::try_parse_from([
            "prism",
            "requests",
            "list",
            "--model",
            "gpt-4o",
            "--since",
            "7d",
            "--property",
            "env=prod",
            "--property",
            "app=web",
        ])
        .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Requests { .. }));
    }

    #[test]
    fn export_format_and_cap_flags_parse() {
        let cli = Cli::try_parse_from([
            "prism",
            "requests",
            "export",
            "--export-format",
            "csv",
            "--limit",
            "500",
            "--fields",
            "model,status",
        ])
        .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Requests { .. }));
    }
}
