use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use prioritizer::error::AppError;

use crate::commands::{run_import, run_score};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Project Prioritization Service",
    about = "Run the WSJF prioritization service or score projects from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a questionnaire snapshot from a JSON file and print the result
    Score(ScoreArgs),
    /// Load a CSV batch of projects and print the resulting priority board
    Import(ImportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a JSON file containing the raw answers
    pub(crate) answers: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Path to the CSV export to load
    pub(crate) csv: PathBuf,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Import(args) => run_import(args),
    }
}
