//! Read/write decisions for a picture's comment thread.
//!
//! Scopes are tried in order: owner, list, others. The first scope that both
//! applies to the viewer and grants the flag wins. A scope that applies but
//! does not grant falls through to the next one.

use crate::lists::ListRegistry;
use crate::mode::Access;
use crate::pictures::Picture;

/// The scope that granted access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Owner,
    List,
    Others,
}

pub fn resolve(
    picture: &Picture,
    viewer: &str,
    lists: &ListRegistry,
    access: Access,
) -> Option<Scope> {
    let permissions = &picture.permissions;

    if viewer == picture.owner && permissions.owner.allows(access) {
        return Some(Scope::Owner);
    }
    if picture.has_list()
        && lists.is_member(&picture.list, viewer)
        && permissions.list.allows(access)
    {
        return Some(Scope::List);
    }
    if permissions.others.allows(access) {
        return Some(Scope::Others);
    }

    log::trace!(
        "{} has no {} scope on picture {}",
        viewer,
        access,
        picture.name
    );
    None
}

pub fn can_read(picture: &Picture, viewer: &str, lists: &ListRegistry) -> bool {
    resolve(picture, viewer, lists, Access::Read).is_some()
}

pub fn can_write(picture: &Picture, viewer: &str, lists: &ListRegistry) -> bool {
    resolve(picture, viewer, lists, Access::Write).is_some()
}
