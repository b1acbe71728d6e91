use serde::Serialize;

use crate::errors::{DuplicateError, NotFoundError};
use crate::Identity;

/// Registered friends of the profile, kept in registration order.
///
/// The order matters only for persistence: the first stored identity is the
/// one that became the profile owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FriendRegistry {
    friends: Vec<Identity>,
}

impl FriendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.friends.iter().any(|friend| friend == name)
    }

    pub fn add(&mut self, name: &str) -> Result<(), DuplicateError> {
        if self.contains(name) {
            return Err(DuplicateError::Friend(name.to_owned()));
        }
        self.friends.push(name.to_owned());
        Ok(())
    }

    /// Fail with `NotFoundError::Friend` unless `name` is registered.
    pub fn require(&self, name: &str) -> Result<(), NotFoundError> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(NotFoundError::Friend(name.to_owned()))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.friends.iter()
    }

    pub fn len(&self) -> usize {
        self.friends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_friend_is_rejected() {
        let mut friends = FriendRegistry::new();
        friends.add("alice").unwrap();
        assert_eq!(
            friends.add("alice"),
            Err(DuplicateError::Friend("alice".to_owned()))
        );
        assert_eq!(friends.len(), 1);
    }

    #[test]
    fn keeps_registration_order() {
        let mut friends = FriendRegistry::new();
        for name in ["carol", "alice", "bob"] {
            friends.add(name).unwrap();
        }
        let order: Vec<_> = friends.iter().map(String::as_str).collect();
        assert_eq!(order, vec!["carol", "alice", "bob"]);
    }

    #[test]
    fn require_reports_unknown_identity() {
        let friends = FriendRegistry::new();
        assert_eq!(
            friends.require("mallory"),
            Err(NotFoundError::Friend("mallory".to_owned()))
        );
    }
}
