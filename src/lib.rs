mod cli;
mod infra;
mod routes;
mod server;

pub mod config;
pub mod error;
pub mod reports;
pub mod telemetry;

use error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
