mod cli;
mod demo;
mod draft;
mod infra;

use engineer_registration::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
