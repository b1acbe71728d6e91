#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Format {
    #[clap(name = "text")]
    Text,
    #[clap(name = "json")]
    Json,
}
