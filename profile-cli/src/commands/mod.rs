use clap::Subcommand;

pub mod run;
pub mod show;

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Execute a command script against the profile")]
    Run(run::Run),
    #[command(about = "Print a saved profile")]
    Show(show::Show),
}
