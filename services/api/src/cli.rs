use crate::classify::{run_categories, run_classify, CategoriesArgs, ClassifyArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use tcm_constitution::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Constitution Quiz Service",
    about = "Classify body-constitution questionnaires over HTTP or from the command line",
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
    /// Classify a single questionnaire and print the result
    Classify(ClassifyArgs),
    /// List the categories of the active table
    Categories(CategoriesArgs),
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
        Command::Classify(args) => run_classify(args),
        Command::Categories(args) => run_categories(args),
    }
}
