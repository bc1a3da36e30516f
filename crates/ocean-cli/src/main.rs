//! ocean CLI — the respondent-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "ocean",
    version,
    about = "OCEAN personality questionnaire with emailed results"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the assessment interactively
    Take {
        /// Print the report instead of emailing it
        #[arg(long)]
        dry_run: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a filled-in answer sheet
    Report {
        /// Path to the .toml answer sheet
        #[arg(long)]
        answers: PathBuf,

        /// Email the report instead of printing it
        #[arg(long)]
        send: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the questionnaire statements
    Questions,

    /// Create starter config and example answer sheet
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ocean=warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take { dry_run, config } => commands::take::execute(dry_run, config).await,
        Commands::Report {
            answers,
            send,
            config,
        } => commands::report::execute(answers, send, config).await,
        Commands::Questions => commands::questions::execute(),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
