use std::path::PathBuf;

use profile_access::{Config, Dispatcher, FileAudit, ProfileError};

use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "run", about = "Execute a command script against the profile")]
pub struct Run {
    #[clap(value_parser, help = "Script with one instruction per line")]
    pub script: PathBuf,
    #[clap(
        long,
        value_parser,
        default_value = ".",
        help = "Directory holding the profile files and the audit trail"
    )]
    pub data_dir: PathBuf,
    #[clap(long, action = clap::ArgAction::SetTrue, help = "Continue from the saved profile instead of starting empty")]
    pub resume: bool,
    #[clap(short, long, action = clap::ArgAction::SetTrue, help = "Print every audit line as it is recorded")]
    pub echo: bool,
}

impl Run {
    pub fn run(&self) -> Result<(), AppError> {
        let config = Config::new(&self.data_dir).resume(self.resume);
        let audit = FileAudit::new(&config.audit_path());

        let mut dispatcher = Dispatcher::open(&config, audit).map_err(|e| {
            AppError::ProfileOpenError(
                config.data_dir.display().to_string(),
                e.to_string(),
            )
        })?;

        let echo = self.echo;
        let summary = dispatcher
            .run_script_with(&self.script, |outcome| {
                if echo {
                    println!("{}", outcome.line);
                }
                if let Some(output) = &outcome.output {
                    println!("{}", output);
                }
            })
            .map_err(|e| match e {
                ProfileError::Io(e) => AppError::ScriptReadError(
                    self.script.display().to_string(),
                    e.to_string(),
                ),
                other => AppError::ProfileError(other),
            })?;

        log::info!(
            "{} commands, {} failed, ended: {}",
            summary.processed,
            summary.failed,
            summary.ended
        );
        Ok(())
    }
}
