mod cli;
mod commands;
mod infra;

use counselling::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
