pub mod file_storage;

use std::fs;
use std::path::{Path, PathBuf};

use crate::lists::ListRecord;
use crate::pictures::PictureRecord;
use crate::state::ProfileState;
use crate::{
    ProfileError, Result, FRIENDS_FILE, LISTS_FILE, PICTURES_FILE, STAGING_DIR,
};

use file_storage::FileStorage;

/// Persisted profile state inside a data directory.
///
/// ```text
/// friends.txt    alice            one identity per line, owner first
/// list.txt       family bob carol list name followed by its members
/// pictures.txt   pic1 bob family rw r- --
/// pic1           pic1             title line, then one comment per line
/// ```
pub struct ProfileStorage {
    root: PathBuf,
    friends: FileStorage,
    lists: FileStorage,
    pictures: FileStorage,
}

impl ProfileStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            friends: FileStorage::new("friends".to_owned(), &root.join(FRIENDS_FILE)),
            lists: FileStorage::new("lists".to_owned(), &root.join(LISTS_FILE)),
            pictures: FileStorage::new(
                "pictures".to_owned(),
                &root.join(PICTURES_FILE),
            ),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn comments(&self, picture: &str) -> FileStorage {
        FileStorage::new(format!("picture {}", picture), &self.root.join(picture))
    }

    /// Empty the management files so a fresh run starts from nothing.
    /// Comment files of the pictures listed so far are removed as well.
    pub fn reset(&self) -> Result<()> {
        log::info!("resetting profile storage in {}", self.root.display());
        match self.pictures.read_from_disk::<PictureRecord>() {
            Ok(records) => {
                for record in records {
                    let comments = self.comments(&record.name);
                    if comments.exists() {
                        comments.erase()?;
                    }
                }
            }
            Err(err) => log::warn!(
                "keeping old picture files, {} is unreadable: {}",
                PICTURES_FILE,
                err
            ),
        }

        self.friends.write_to_disk(std::iter::empty::<String>())?;
        self.lists.write_to_disk(std::iter::empty::<String>())?;
        self.pictures.write_to_disk(std::iter::empty::<String>())?;
        Ok(())
    }

    /// Rebuild the registries from disk. Session state is not persisted:
    /// the loaded profile has no viewer and its owner has not viewed yet.
    pub fn load(&self) -> Result<ProfileState> {
        let mut state = ProfileState::new();

        let friends: Vec<String> = self.friends.read_from_disk()?;
        for friend in friends {
            state
                .session
                .register_friend(&mut state.friends, &friend)?;
        }

        let lists: Vec<ListRecord> = self.lists.read_from_disk()?;
        for record in lists {
            state.lists.insert_record(record);
        }

        let pictures: Vec<PictureRecord> = self.pictures.read_from_disk()?;
        for record in pictures {
            // first line of a comment file is the picture's title
            let comments = self
                .comments(&record.name)
                .read_lines()?
                .into_iter()
                .skip(1)
                .collect();
            state.pictures.insert_loaded(record, comments);
        }

        log::info!(
            "loaded {} friends, {} lists, {} pictures from {}",
            state.friends.len(),
            state.lists.len(),
            state.pictures.len(),
            self.root.display()
        );
        Ok(state)
    }

    /// Write the whole profile.
    ///
    /// Every file is first written into a staging directory and only moved
    /// into the data directory once all of them were written. A failed save
    /// leaves the previously saved profile in place.
    pub fn save(&self, state: &ProfileState) -> Result<()> {
        let mut targets = vec![
            FRIENDS_FILE.to_owned(),
            LISTS_FILE.to_owned(),
            PICTURES_FILE.to_owned(),
        ];
        targets.extend(state.pictures.iter().map(|picture| picture.name.clone()));

        for name in &targets {
            if self.root.join(name).is_dir() {
                return Err(ProfileError::Storage(
                    name.clone(),
                    "target is a directory".to_owned(),
                ));
            }
        }

        let staging = self.root.join(STAGING_DIR);
        if staging.exists() {
            fs::remove_dir_all(&staging)?;
        }
        if let Err(err) = self.stage(&staging, state) {
            if let Err(cleanup) = fs::remove_dir_all(&staging) {
                log::warn!("failed to remove {}: {}", staging.display(), cleanup);
            }
            return Err(err);
        }

        for name in &targets {
            fs::rename(staging.join(name), self.root.join(name))?;
        }
        fs::remove_dir(&staging)?;
        log::debug!("{} files moved into {}", targets.len(), self.root.display());
        Ok(())
    }

    fn stage(&self, staging: &Path, state: &ProfileState) -> Result<()> {
        let staged = |label: &str, name: &str| {
            FileStorage::new(label.to_owned(), &staging.join(name))
        };

        staged("friends", FRIENDS_FILE).write_to_disk(state.friends.iter())?;
        staged("lists", LISTS_FILE).write_to_disk(state.lists.records())?;
        staged("pictures", PICTURES_FILE)
            .write_to_disk(state.pictures.iter().map(|picture| picture.record()))?;

        for picture in state.pictures.iter() {
            let lines = std::iter::once(picture.title()).chain(
                picture.comments.iter().map(String::as_str),
            );
            staged(&format!("picture {}", picture.name), &picture.name)
                .write_to_disk(lines)?;
        }
        Ok(())
    }
}
