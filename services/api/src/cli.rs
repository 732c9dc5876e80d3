use crate::demo::{run_demo, run_review, DemoArgs, ReviewArgs};
use crate::server;
use agencia::config::StoreKind;
use agencia::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Agencia",
    about = "Serve and maintain the vehicle-service agency records",
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
    /// Run the client inactivity sweep once against the configured store
    Revisar(ReviewArgs),
    /// Seed an in-memory agency and walk through an inactivity sweep
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
    /// Override the configured document store (mongo or memory)
    #[arg(long, value_parser = crate::infra::parse_store_kind)]
    pub(crate) store: Option<StoreKind>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Revisar(args) => run_review(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
