use serde::Serialize;

use crate::friends::FriendRegistry;
use crate::lists::ListRegistry;
use crate::pictures::PictureStore;
use crate::session::Session;
use crate::Result;

/// Everything a run knows about the profile.
///
/// Owned by the dispatcher and handed to each handler explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileState {
    pub friends: FriendRegistry,
    pub lists: ListRegistry,
    pub pictures: PictureStore,
    pub session: Session,
}

impl ProfileState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty JSON snapshot, for inspection.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
