use std::fmt;

use thiserror::Error;

use crate::mode::Access;

pub type Result<T> = std::result::Result<T, ProfileError>;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error(transparent)]
    Duplicate(#[from] DuplicateError),
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parsing error: {0}")]
    Parse(String),
    #[error("Storage error: {0} {1}")]
    Storage(String, String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("{active} is already viewing the profile")]
    ConcurrentViewer { active: String },
    #[error("no one is viewing the profile")]
    NoActiveViewer,
    #[error("profile owner {owner} must view the profile first")]
    OwnerMustViewFirst { owner: String },
    #[error("only the profile owner may do this")]
    NotProfileOwner,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("picture {0} does not exist")]
    Picture(String),
    #[error("list {0} does not exist")]
    List(String),
    #[error("{0} is not a friend")]
    Friend(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DuplicateError {
    #[error("friend {0} already exists")]
    Friend(String),
    #[error("picture {0} already exists")]
    Picture(String),
    #[error("list {0} already exists")]
    List(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("{viewer} is not authorized to change picture {picture}")]
    NotAuthorized { viewer: String, picture: String },
    #[error("{viewer} denied {access} access to picture {picture}")]
    AccessDenied {
        viewer: String,
        picture: String,
        access: Access,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is a reserved name")]
    ReservedName(String),
    #[error("{0} is not a valid picture name")]
    InvalidName(String),
    #[error("a list cannot be named {0}")]
    ReservedListName(String),
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    #[error("{instruction} expects {expected} argument(s), got {got}")]
    Arity {
        instruction: &'static str,
        expected: Arity,
        got: usize,
    },
    #[error("invalid permission mode: {0}")]
    InvalidMode(String),
}

/// Number of arguments an instruction accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, got: usize) -> bool {
        match *self {
            Arity::Exactly(n) => got == n,
            Arity::AtLeast(n) => got >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// Coarse classification of command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Session,
    EntityNotFound,
    DuplicateEntity,
    Authorization,
    Validation,
    Persistence,
}

impl ProfileError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProfileError::Session(_) => ErrorCategory::Session,
            ProfileError::NotFound(_) => ErrorCategory::EntityNotFound,
            ProfileError::Duplicate(_) => ErrorCategory::DuplicateEntity,
            ProfileError::Authorization(_) => ErrorCategory::Authorization,
            ProfileError::Validation(_) => ErrorCategory::Validation,
            ProfileError::Io(_)
            | ProfileError::Parse(_)
            | ProfileError::Storage(_, _)
            | ProfileError::Other(_) => ErrorCategory::Persistence,
        }
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<std::convert::Infallible> for ProfileError {
    fn from(e: std::convert::Infallible) -> Self {
        match e {}
    }
}
