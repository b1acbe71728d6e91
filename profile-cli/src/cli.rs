use crate::commands::Commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "profile-cli")]
#[clap(about = "Run profile access scripts and inspect saved profiles", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
