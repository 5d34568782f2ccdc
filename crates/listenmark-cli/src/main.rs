//! listenmark CLI — the terminal front end for listening practice.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;

#[derive(Parser)]
#[command(name = "listenmark", version, about = "IELTS listening practice and scoring")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the questions of a bank
    Show {
        /// Question bank TOML (defaults to the built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Only questions of this type: free_text, multi_select_trio
        #[arg(long)]
        kind: Option<String>,

        /// Lowest question number to show
        #[arg(long)]
        from: Option<u32>,

        /// Highest question number to show
        #[arg(long)]
        to: Option<u32>,

        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,
    },

    /// Score an answer sheet
    Check {
        /// Answer sheet TOML
        #[arg(long)]
        answers: PathBuf,

        /// Question bank TOML (defaults to the built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,

        /// Show accepted answers next to each verdict
        #[arg(long)]
        reveal: bool,
    },

    /// Take the quiz interactively
    Take {
        /// Question bank TOML (defaults to the built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Show accepted answers after submitting
        #[arg(long)]
        reveal: bool,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to a question bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Create starter config, question bank, and answer sheet
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("listenmark=info,listenmark_core=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Show {
            bank,
            kind,
            from,
            to,
            format,
        } => commands::show::execute(bank, kind, from, to, format, cli.config),
        Commands::Check {
            answers,
            bank,
            format,
            reveal,
        } => commands::check::execute(answers, bank, format, reveal, cli.config),
        Commands::Take { bank, reveal } => commands::take::execute(bank, reveal, cli.config),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
