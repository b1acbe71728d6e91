use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::{DuplicateError, NotFoundError, ProfileError, ValidationError};
use crate::mode::Permissions;
use crate::{Identity, NIL_LIST, RESERVED_FILES};

/// A posted picture: an opaque container for a comment thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Picture {
    pub name: String,
    pub owner: Identity,
    pub list: String,
    pub permissions: Permissions,
    pub comments: Vec<String>,
}

impl Picture {
    fn new(name: &str, owner: &str) -> Self {
        Self {
            name: name.to_owned(),
            owner: owner.to_owned(),
            list: NIL_LIST.to_owned(),
            permissions: Permissions::default(),
            comments: Vec::new(),
        }
    }

    pub fn has_list(&self) -> bool {
        self.list != NIL_LIST
    }

    /// Title written on the first line of the picture's comment file: the
    /// name without a trailing `.txt`. Never empty, see [`is_picture_name`].
    pub fn title(&self) -> &str {
        self.name.strip_suffix(".txt").unwrap_or(&self.name)
    }

    pub fn record(&self) -> PictureRecord {
        PictureRecord {
            name: self.name.clone(),
            owner: self.owner.clone(),
            list: self.list.clone(),
            permissions: self.permissions,
        }
    }
}

/// A picture's comments live in a file of the same name inside the data
/// directory, so the name must be one plain path component. `.txt` alone
/// is refused too, it would leave an empty title.
pub fn is_picture_name(name: &str) -> bool {
    !name.contains(|c: char| c == '/' || c == '\\')
        && name != ".txt"
        && Path::new(name).file_name() == Some(OsStr::new(name))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PictureStore {
    pictures: BTreeMap<String, Picture>,
}

impl PictureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, name: &str, owner: &str) -> Result<(), ProfileError> {
        if !is_picture_name(name) {
            return Err(ValidationError::InvalidName(name.to_owned()).into());
        }
        if RESERVED_FILES.contains(&name) {
            return Err(ValidationError::ReservedName(name.to_owned()).into());
        }
        if self.pictures.contains_key(name) {
            return Err(DuplicateError::Picture(name.to_owned()).into());
        }
        self.pictures
            .insert(name.to_owned(), Picture::new(name, owner));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Picture, NotFoundError> {
        self.pictures
            .get(name)
            .ok_or_else(|| NotFoundError::Picture(name.to_owned()))
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Picture, NotFoundError> {
        self.pictures
            .get_mut(name)
            .ok_or_else(|| NotFoundError::Picture(name.to_owned()))
    }

    /// Assign `list` to the picture. The list's existence and the caller's
    /// right to pick it are checked by the dispatcher.
    pub fn set_list(&mut self, name: &str, list: &str) -> Result<(), NotFoundError> {
        self.get_mut(name)?.list = list.to_owned();
        Ok(())
    }

    pub fn set_permissions(
        &mut self,
        name: &str,
        permissions: Permissions,
    ) -> Result<(), NotFoundError> {
        self.get_mut(name)?.permissions = permissions;
        Ok(())
    }

    pub fn set_owner(&mut self, name: &str, owner: &str) -> Result<(), NotFoundError> {
        self.get_mut(name)?.owner = owner.to_owned();
        Ok(())
    }

    /// Append a comment. Write access must already have been granted.
    pub fn append_comment(
        &mut self,
        name: &str,
        text: &str,
    ) -> Result<(), NotFoundError> {
        self.get_mut(name)?.comments.push(text.to_owned());
        Ok(())
    }

    /// The whole comment thread as one block of text, one comment per line.
    /// Read access must already have been granted.
    pub fn read_comments(&self, name: &str) -> Result<String, NotFoundError> {
        Ok(self.get(name)?.comments.join("\n"))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Picture> {
        self.pictures.values()
    }

    pub fn len(&self) -> usize {
        self.pictures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pictures.is_empty()
    }

    pub(crate) fn insert_loaded(&mut self, record: PictureRecord, comments: Vec<String>) {
        let picture = Picture {
            name: record.name,
            owner: record.owner,
            list: record.list,
            permissions: record.permissions,
            comments,
        };
        self.pictures.insert(picture.name.clone(), picture);
    }
}

/// One line of the picture storage:
/// `name owner list ownerMode listMode othersMode`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureRecord {
    pub name: String,
    pub owner: Identity,
    pub list: String,
    pub permissions: Permissions,
}

impl fmt::Display for PictureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name, self.owner, self.list, self.permissions
        )
    }
}

impl FromStr for PictureRecord {
    type Err = ProfileError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [name, owner, list, owner_mode, list_mode, others_mode] => {
                if !is_picture_name(name) {
                    return Err(
                        ValidationError::InvalidName((*name).to_owned()).into()
                    );
                }
                Ok(PictureRecord {
                    name: (*name).to_owned(),
                    owner: (*owner).to_owned(),
                    list: (*list).to_owned(),
                    permissions: Permissions::parse(
                        owner_mode,
                        list_mode,
                        others_mode,
                    )?,
                })
            }
            _ => Err(ProfileError::Parse(format!(
                "malformed picture record: {}",
                line
            ))),
        }
    }
}
