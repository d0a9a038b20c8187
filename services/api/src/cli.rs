use crate::commands::{run_batch, run_evaluate, BatchArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fund_evaluator::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "fund-evaluator",
    about = "Score startup funding requests with the rule-based fallback evaluator",
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
    /// Score a single request stored as JSON and print the response
    Evaluate(EvaluateArgs),
    /// Score every row of a CSV export and print one summary line per company
    Batch(BatchArgs),
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

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Batch(args) => run_batch(args),
    }
}
