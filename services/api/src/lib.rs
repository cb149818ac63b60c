mod classify;
mod cli;
mod infra;
mod routes;
mod server;

use tcm_constitution::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
