use profile_access::ProfileError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Couldn't read script {0}: {1}")]
    ScriptReadError(String, String),

    #[error("Couldn't open profile in {0}: {1}")]
    ProfileOpenError(String, String),

    #[error("Couldn't load profile: {0}")]
    ProfileLoadError(String),

    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error(transparent)]
    ProfileError(#[from] ProfileError),
}
