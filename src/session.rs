//! Who is looking at the profile right now.
//!
//! The profile has exactly one owner, fixed by the first successful friend
//! registration, and at most one viewer at a time. Nobody but the owner may
//! view the profile until the owner has viewed it once.

use serde::Serialize;

use crate::errors::{NotFoundError, ProfileError, SessionError};
use crate::friends::FriendRegistry;
use crate::Identity;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    profile_owner: Option<Identity>,
    current_viewer: Option<Identity>,
    owner_has_viewed: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile_owner(&self) -> Option<&str> {
        self.profile_owner.as_deref()
    }

    pub fn current_viewer(&self) -> Option<&str> {
        self.current_viewer.as_deref()
    }

    pub fn owner_has_viewed(&self) -> bool {
        self.owner_has_viewed
    }

    fn is_owner(&self, name: &str) -> bool {
        self.profile_owner.as_deref() == Some(name)
    }

    /// Register a friend. The first friend ever registered becomes the
    /// profile owner. Returns `true` when that happened.
    pub fn register_friend(
        &mut self,
        friends: &mut FriendRegistry,
        name: &str,
    ) -> Result<bool, ProfileError> {
        friends.add(name)?;
        if self.profile_owner.is_none() {
            log::info!("{} is the profile owner", name);
            self.profile_owner = Some(name.to_owned());
            return Ok(true);
        }
        Ok(false)
    }

    pub fn begin_view(
        &mut self,
        friends: &FriendRegistry,
        name: &str,
    ) -> Result<(), ProfileError> {
        if !friends.contains(name) {
            return Err(NotFoundError::Friend(name.to_owned()).into());
        }
        if let Some(active) = &self.current_viewer {
            return Err(SessionError::ConcurrentViewer {
                active: active.clone(),
            }
            .into());
        }
        if !self.owner_has_viewed && !self.is_owner(name) {
            return Err(SessionError::OwnerMustViewFirst {
                owner: self.profile_owner.clone().unwrap_or_default(),
            }
            .into());
        }

        if self.is_owner(name) {
            self.owner_has_viewed = true;
        }
        self.current_viewer = Some(name.to_owned());
        Ok(())
    }

    /// Log the current viewer out, returning who it was.
    pub fn end_view(&mut self) -> Result<Identity, SessionError> {
        self.current_viewer
            .take()
            .ok_or(SessionError::NoActiveViewer)
    }

    pub fn require_viewer(&self) -> Result<&str, SessionError> {
        self.current_viewer
            .as_deref()
            .ok_or(SessionError::NoActiveViewer)
    }

    pub fn require_owner_viewer(&self) -> Result<&str, SessionError> {
        let viewer = self.require_viewer()?;
        if self.is_owner(viewer) {
            Ok(viewer)
        } else {
            Err(SessionError::NotProfileOwner)
        }
    }

    /// `true` while the current viewer is the profile owner.
    pub fn owner_is_viewing(&self) -> bool {
        self.current_viewer
            .as_deref()
            .map(|viewer| self.is_owner(viewer))
            .unwrap_or(false)
    }

    /// Friends may be registered while the profile is still being set up,
    /// i.e. before the owner's first view, and afterwards only by the owner.
    pub fn require_friend_registrar(&self) -> Result<(), SessionError> {
        if !self.owner_has_viewed || self.owner_is_viewing() {
            Ok(())
        } else {
            Err(SessionError::NotProfileOwner)
        }
    }
}
