use clap::Parser;

mod cli;
mod commands;
mod error;
mod models;

pub use error::AppError;

use cli::Cli;
use commands::Commands;

fn main() {
    env_logger::init();

    let args = Cli::parse();

    let result = match &args.command {
        Commands::Run(run) => run.run(),
        Commands::Show(show) => show.run(),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
