use crate::demo::{run_audit, run_check, run_cohort, run_demo, AuditArgs, CheckArgs, CohortArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use timetable::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Timetable Assignments",
    about = "Serve and inspect faculty timetable assignments from the command line",
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
    /// Check whether a proposed assignment fits an exported snapshot
    Check(CheckArgs),
    /// Report invariant breaches in an exported snapshot
    Audit(AuditArgs),
    /// Resolve a student registration number to its cohort
    Cohort(CohortArgs),
    /// Walk through the assignment rules against an in-memory store
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// CSV snapshot to seed the in-memory assignment store with
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Check(args) => run_check(args),
        Command::Audit(args) => run_audit(args),
        Command::Cohort(args) => run_cohort(args),
        Command::Demo => run_demo(),
    }
}
