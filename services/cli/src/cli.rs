use crate::commands::{run_allocate, run_inspect, AllocateArgs, InspectArgs};
use clap::{Parser, Subcommand};
use counselling::config::AppConfig;
use counselling::error::AppError;
use counselling::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "counselling",
    about = "Rank applicant rosters and allocate reserved-category seats for counselling rounds",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Allocate seats for one counselling round and print the lists
    Allocate(AllocateArgs),
    /// Import a roster and report accepted, skipped and flagged rows
    Inspect(InspectArgs),
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Allocate(args) => run_allocate(args, &config).await,
        Command::Inspect(args) => run_inspect(args),
    }
}
