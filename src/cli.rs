use crate::error::AppError;
use crate::infra::{
    seeded_store, DEMO_360_ASSIGNMENT, DEMO_BLOCKER_ASSIGNMENT, DEMO_LEADER_ASSIGNMENT,
};
use crate::reports::{AssignmentId, ReportComposer};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "Talent Assessment Reports",
    about = "Compose assessment reports and serve them over HTTP",
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
    /// Compose a report from the seeded demo dataset and print it as JSON
    Report(ReportArgs),
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
pub(crate) struct ReportArgs {
    /// Assignment to compose; defaults to the seeded Leader assignment
    #[arg(long)]
    assignment_id: Option<String>,
    /// List the seeded demo assignment ids and exit
    #[arg(long)]
    list: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
    }
}

fn run_report(args: ReportArgs) -> Result<(), AppError> {
    if args.list {
        println!("seeded demo assignments:");
        println!("  {DEMO_LEADER_ASSIGNMENT}   (Leader report)");
        println!("  {DEMO_BLOCKER_ASSIGNMENT}  (Blocker report)");
        println!("  {DEMO_360_ASSIGNMENT}  (360 report)");
        return Ok(());
    }

    let assignment_id = AssignmentId(
        args.assignment_id
            .unwrap_or_else(|| DEMO_LEADER_ASSIGNMENT.to_string()),
    );

    let composer = ReportComposer::new(Arc::new(seeded_store()));
    let report = composer.compose(&assignment_id)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
