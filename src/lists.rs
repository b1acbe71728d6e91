use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::Serialize;

use crate::errors::{DuplicateError, NotFoundError, ProfileError, ValidationError};
use crate::{Identity, NIL_LIST};

/// Named groups of friends used to scope picture access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListRegistry {
    lists: BTreeMap<String, BTreeSet<Identity>>,
}

impl ListRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, name: &str) -> Result<(), ProfileError> {
        if name == NIL_LIST {
            return Err(ValidationError::ReservedListName(name.to_owned()).into());
        }
        if self.lists.contains_key(name) {
            return Err(DuplicateError::List(name.to_owned()).into());
        }
        self.lists.insert(name.to_owned(), BTreeSet::new());
        Ok(())
    }

    pub fn exists(&self, name: &str) -> bool {
        self.lists.contains_key(name)
    }

    /// Add `member` to `list`. Whether `member` is a registered friend is
    /// checked by the caller. Adding an existing member is a no-op.
    pub fn add_member(
        &mut self,
        list: &str,
        member: &str,
    ) -> Result<(), NotFoundError> {
        let members = self
            .lists
            .get_mut(list)
            .ok_or_else(|| NotFoundError::List(list.to_owned()))?;
        members.insert(member.to_owned());
        Ok(())
    }

    /// `false` for unknown lists and for `nil`.
    pub fn is_member(&self, list: &str, member: &str) -> bool {
        self.lists
            .get(list)
            .map(|members| members.contains(member))
            .unwrap_or(false)
    }

    pub fn records(&self) -> impl Iterator<Item = ListRecord> + '_ {
        self.lists
            .iter()
            .map(|(name, members)| ListRecord {
                name: name.clone(),
                members: members.clone(),
            })
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub(crate) fn insert_record(&mut self, record: ListRecord) {
        self.lists.insert(record.name, record.members);
    }
}

/// One line of the list storage: `name member1 member2 ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRecord {
    pub name: String,
    pub members: BTreeSet<Identity>,
}

impl fmt::Display for ListRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.members.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.name, self.members.iter().join(" "))
        }
    }
}

impl FromStr for ListRecord {
    type Err = ProfileError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let name = tokens
            .next()
            .ok_or_else(|| ProfileError::Parse("empty list record".to_owned()))?;
        Ok(ListRecord {
            name: name.to_owned(),
            members: tokens.map(str::to_owned).collect(),
        })
    }
}
