//! Permission modes attached to pictures.
//!
//! A [`Mode`] is a pair of read/write flags. Its textual form (`rw`, `r-`,
//! `-w`, `--`) only appears at the script and storage boundaries; everything
//! inside the crate works with the flags directly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Read => write!(f, "read"),
            Access::Write => write!(f, "write"),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub struct Mode {
    pub read: bool,
    pub write: bool,
}

impl Mode {
    pub const NONE: Mode = Mode {
        read: false,
        write: false,
    };
    pub const READ_WRITE: Mode = Mode {
        read: true,
        write: true,
    };

    pub fn new(read: bool, write: bool) -> Self {
        Self { read, write }
    }

    pub fn allows(&self, access: Access) -> bool {
        match access {
            Access::Read => self.read,
            Access::Write => self.write,
        }
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidMode(s.to_owned());
        let mut chars = s.chars();
        let read = match chars.next() {
            Some('r') => true,
            Some('-') => false,
            _ => return Err(invalid()),
        };
        let write = match chars.next() {
            Some('w') => true,
            Some('-') => false,
            _ => return Err(invalid()),
        };
        if chars.next().is_some() {
            return Err(invalid());
        }
        Ok(Mode { read, write })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let read = if self.read { 'r' } else { '-' };
        let write = if self.write { 'w' } else { '-' };
        write!(f, "{}{}", read, write)
    }
}

/// The owner / list / others triple of a picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub owner: Mode,
    pub list: Mode,
    pub others: Mode,
}

impl Permissions {
    pub fn new(owner: Mode, list: Mode, others: Mode) -> Self {
        Self {
            owner,
            list,
            others,
        }
    }

    /// Parse the three mode tokens of a `chmod` instruction or a stored
    /// picture record.
    pub fn parse(
        owner: &str,
        list: &str,
        others: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            owner: owner.parse()?,
            list: list.parse()?,
            others: others.parse()?,
        })
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self {
            owner: Mode::READ_WRITE,
            list: Mode::NONE,
            others: Mode::NONE,
        }
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.owner, self.list, self.others)
    }
}
