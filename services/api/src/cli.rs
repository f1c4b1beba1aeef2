use crate::report::{run_demo, run_explain, run_rank, DemoArgs, ExplainArgs, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use talent_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "talent-ai",
    about = "Score and rank job candidates with a fuzzy rule base",
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
    /// Rank every candidate in a CSV export
    Rank(RankArgs),
    /// Show how a single candidate's score was reached
    Explain(ExplainArgs),
    /// Score the built-in sample candidates and compare them
    Demo(DemoArgs),
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
        Command::Rank(args) => run_rank(args),
        Command::Explain(args) => run_explain(args),
        Command::Demo(args) => run_demo(args),
    }
}
