mod cli;
mod commands;
mod infra;

use date_night::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
