mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// PDDL 3.1 parser and validator.
#[derive(Parser)]
#[command(name = "pddl", version, about = "PDDL 3.1 parser and validator")]
struct Cli {
    /// Output format for errors (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Don't print the canonical rendering on success
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a PDDL domain file and print its canonical form
    Domain {
        /// Path to the domain file
        file: PathBuf,
    },

    /// Check a PDDL problem file and print its canonical form
    Problem {
        /// Path to the problem file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Domain { file } => commands::cmd_domain(&file, cli.output, cli.quiet),
        Commands::Problem { file } => commands::cmd_problem(&file, cli.output, cli.quiet),
    }
}
