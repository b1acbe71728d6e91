//! Runs instructions against the profile, one at a time.
//!
//! Every instruction produces exactly one outcome, which is handed to the
//! audit sink before the next instruction is looked at. A failed instruction
//! leaves the state untouched.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::audit::AuditSink;
use crate::command::Instruction;
use crate::config::Config;
use crate::errors::{AuthorizationError, NotFoundError};
use crate::mode::{Access, Permissions};
use crate::resolver;
use crate::state::ProfileState;
use crate::storage::ProfileStorage;
use crate::{ProfileError, Result, NIL_LIST};

/// Result of one processed instruction.
#[derive(Debug)]
pub struct Outcome {
    /// The audit line.
    pub line: String,
    /// Text produced for the viewer, e.g. the comments of a picture.
    pub output: Option<String>,
    pub error: Option<ProfileError>,
}

impl Outcome {
    fn success(success: Success) -> Self {
        Self {
            line: success.message,
            output: success.output,
            error: None,
        }
    }

    fn failure(error: ProfileError) -> Self {
        Self {
            line: format!("Error: {}", error),
            output: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

struct Success {
    message: String,
    output: Option<String>,
}

impl Success {
    fn message(message: String) -> Self {
        Self {
            message,
            output: None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
    pub ended: bool,
}

pub struct Dispatcher<A: AuditSink> {
    state: ProfileState,
    audit: A,
    storage: Option<ProfileStorage>,
    ended: bool,
}

impl<A: AuditSink> Dispatcher<A> {
    /// A dispatcher that keeps everything in memory; `end` flushes nothing.
    pub fn new(state: ProfileState, audit: A) -> Self {
        Self {
            state,
            audit,
            storage: None,
            ended: false,
        }
    }

    /// A dispatcher backed by the data directory of `config`.
    ///
    /// Fresh runs empty the management files first, resumed runs load them.
    pub fn open(config: &Config, audit: A) -> Result<Self> {
        let storage = ProfileStorage::new(&config.data_dir);
        let state = if config.resume {
            storage.load()?
        } else {
            storage.reset()?;
            ProfileState::new()
        };
        Ok(Self {
            state,
            audit,
            storage: Some(storage),
            ended: false,
        })
    }

    pub fn state(&self) -> &ProfileState {
        &self.state
    }

    pub fn audit(&self) -> &A {
        &self.audit
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn into_parts(self) -> (ProfileState, A) {
        (self.state, self.audit)
    }

    /// Run every line of a script file.
    ///
    /// Fails only when the script cannot be opened or read; lines processed
    /// before a read error keep their effects.
    pub fn run_script<P: AsRef<Path>>(&mut self, path: P) -> Result<RunSummary> {
        self.run_script_with(path, |_: &Outcome| {})
    }

    /// Like [`Dispatcher::run_script`], handing every outcome to `observe`
    /// right after it was recorded.
    pub fn run_script_with<P, F>(
        &mut self,
        path: P,
        mut observe: F,
    ) -> Result<RunSummary>
    where
        P: AsRef<Path>,
        F: FnMut(&Outcome),
    {
        let path = path.as_ref();
        log::info!("running script {}", path.display());

        let reader = BufReader::new(File::open(path)?);
        let mut summary = RunSummary::default();
        for line in reader.lines() {
            let line = line?;
            self.account(&mut summary, &line, &mut observe);
            if self.ended {
                break;
            }
        }
        Ok(self.finish(summary))
    }

    /// Run script lines already in memory.
    pub fn run_lines<I, S>(&mut self, lines: I) -> RunSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut summary = RunSummary::default();
        for line in lines {
            self.account(&mut summary, line.as_ref(), &mut |_: &Outcome| {});
            if self.ended {
                break;
            }
        }
        self.finish(summary)
    }

    fn account<F: FnMut(&Outcome)>(
        &mut self,
        summary: &mut RunSummary,
        line: &str,
        observe: &mut F,
    ) {
        if let Some(outcome) = self.execute_line(line) {
            summary.processed += 1;
            if !outcome.is_success() {
                summary.failed += 1;
            }
            observe(&outcome);
        }
    }

    fn finish(&self, mut summary: RunSummary) -> RunSummary {
        summary.ended = self.ended;
        if !self.ended {
            log::warn!("script finished without `end`, state was not saved");
        }
        log::info!(
            "{} commands processed, {} failed",
            summary.processed,
            summary.failed
        );
        summary
    }

    /// Parse and execute one script line.
    ///
    /// Blank lines are skipped, and nothing runs once `end` succeeded; both
    /// yield `None` and leave no audit line.
    pub fn execute_line(&mut self, line: &str) -> Option<Outcome> {
        if line.trim().is_empty() {
            return None;
        }
        if self.ended {
            log::warn!("ignoring `{}` after end", line.trim());
            return None;
        }

        let outcome = match line.parse::<Instruction>() {
            Ok(instruction) => self.dispatch(&instruction),
            Err(err) => Outcome::failure(err.into()),
        };
        self.emit(&outcome);
        Some(outcome)
    }

    fn dispatch(&mut self, instruction: &Instruction) -> Outcome {
        log::debug!("executing {:?}", instruction);
        let state = &mut self.state;
        let result = match instruction {
            Instruction::FriendAdd { name } => friend_add(state, name),
            Instruction::ViewBy { name } => view_by(state, name),
            Instruction::Logout => logout(state),
            Instruction::ListAdd { name } => list_add(state, name),
            Instruction::FriendList { friend, list } => {
                friend_list(state, friend, list)
            }
            Instruction::PostPicture { name } => post_picture(state, name),
            Instruction::ChangeList { picture, list } => {
                change_list(state, picture, list)
            }
            Instruction::ChangeMode {
                picture,
                owner,
                list,
                others,
            } => change_mode(state, picture, [owner, list, others]),
            Instruction::ChangeOwner { picture, owner } => {
                change_owner(state, picture, owner)
            }
            Instruction::ReadComments { picture } => {
                read_comments(state, picture)
            }
            Instruction::WriteComments { picture, text } => {
                write_comments(state, picture, text)
            }
            Instruction::End => self.end(),
        };

        match result {
            Ok(success) => {
                log::info!("{}: {}", instruction.name(), success.message);
                Outcome::success(success)
            }
            Err(err) => {
                log::info!(
                    "{} failed ({:?}): {}",
                    instruction.name(),
                    err.category(),
                    err
                );
                Outcome::failure(err)
            }
        }
    }

    fn emit(&mut self, outcome: &Outcome) {
        if let Err(err) = self.audit.record(&outcome.line) {
            log::error!("failed to record audit line `{}`: {}", outcome.line, err);
        }
    }

    fn end(&mut self) -> Result<Success> {
        let viewer = self.state.session.require_viewer()?.to_owned();
        if let Some(storage) = &self.storage {
            storage.save(&self.state)?;
            log::info!("profile saved to {}", storage.root().display());
        }
        self.ended = true;
        Ok(Success::message(format!(
            "Profile saved, run ended by {}",
            viewer
        )))
    }
}

fn friend_add(state: &mut ProfileState, name: &str) -> Result<Success> {
    state.session.require_friend_registrar()?;
    let became_owner = state.session.register_friend(&mut state.friends, name)?;
    let message = if became_owner {
        format!("Friend {} added as profile owner", name)
    } else {
        format!("Friend {} added", name)
    };
    Ok(Success::message(message))
}

fn view_by(state: &mut ProfileState, name: &str) -> Result<Success> {
    state.session.begin_view(&state.friends, name)?;
    Ok(Success::message(format!("Friend {} views the profile", name)))
}

fn logout(state: &mut ProfileState) -> Result<Success> {
    let viewer = state.session.end_view()?;
    Ok(Success::message(format!("Friend {} logged out", viewer)))
}

fn list_add(state: &mut ProfileState, name: &str) -> Result<Success> {
    state.session.require_owner_viewer()?;
    state.lists.create(name)?;
    Ok(Success::message(format!("List {} created", name)))
}

fn friend_list(
    state: &mut ProfileState,
    friend: &str,
    list: &str,
) -> Result<Success> {
    state.session.require_owner_viewer()?;
    if !state.lists.exists(list) {
        return Err(NotFoundError::List(list.to_owned()).into());
    }
    state.friends.require(friend)?;
    state.lists.add_member(list, friend)?;
    Ok(Success::message(format!(
        "Friend {} added to list {}",
        friend, list
    )))
}

fn post_picture(state: &mut ProfileState, name: &str) -> Result<Success> {
    let viewer = state.session.require_viewer()?.to_owned();
    state.pictures.create(name, &viewer)?;
    Ok(Success::message(format!(
        "Picture {} posted by {}",
        name, viewer
    )))
}

/// The profile owner and the picture's owner may change a picture's
/// settings; anyone else is turned away.
fn require_picture_admin(
    state: &ProfileState,
    viewer: &str,
    picture: &str,
) -> Result<()> {
    let owner = &state.pictures.get(picture)?.owner;
    if state.session.owner_is_viewing() || owner == viewer {
        Ok(())
    } else {
        Err(AuthorizationError::NotAuthorized {
            viewer: viewer.to_owned(),
            picture: picture.to_owned(),
        }
        .into())
    }
}

fn change_list(
    state: &mut ProfileState,
    picture: &str,
    list: &str,
) -> Result<Success> {
    let viewer = state.session.require_viewer()?.to_owned();
    state.pictures.get(picture)?;
    if list != NIL_LIST && !state.lists.exists(list) {
        return Err(NotFoundError::List(list.to_owned()).into());
    }
    require_picture_admin(state, &viewer, picture)?;

    // a picture owner who is not the profile owner may only pick lists
    // they belong to
    if !state.session.owner_is_viewing()
        && list != NIL_LIST
        && !state.lists.is_member(list, &viewer)
    {
        return Err(AuthorizationError::NotAuthorized {
            viewer,
            picture: picture.to_owned(),
        }
        .into());
    }

    state.pictures.set_list(picture, list)?;
    Ok(Success::message(format!(
        "List of picture {} set to {}",
        picture, list
    )))
}

fn change_mode(
    state: &mut ProfileState,
    picture: &str,
    [owner, list, others]: [&String; 3],
) -> Result<Success> {
    let viewer = state.session.require_viewer()?.to_owned();
    require_picture_admin(state, &viewer, picture)?;
    let permissions = Permissions::parse(owner, list, others)?;

    state.pictures.set_permissions(picture, permissions)?;
    Ok(Success::message(format!(
        "Permissions of picture {} set to {}",
        picture, permissions
    )))
}

fn change_owner(
    state: &mut ProfileState,
    picture: &str,
    owner: &str,
) -> Result<Success> {
    state.session.require_owner_viewer()?;
    state.pictures.get(picture)?;
    state.friends.require(owner)?;

    state.pictures.set_owner(picture, owner)?;
    Ok(Success::message(format!(
        "Owner of picture {} changed to {}",
        picture, owner
    )))
}

fn require_access(
    state: &ProfileState,
    viewer: &str,
    picture: &str,
    access: Access,
) -> Result<()> {
    let target = state.pictures.get(picture)?;
    match resolver::resolve(target, viewer, &state.lists, access) {
        Some(scope) => {
            log::debug!("{} granted {} on {} via {:?}", viewer, access, picture, scope);
            Ok(())
        }
        None => Err(AuthorizationError::AccessDenied {
            viewer: viewer.to_owned(),
            picture: picture.to_owned(),
            access,
        }
        .into()),
    }
}

fn read_comments(state: &mut ProfileState, picture: &str) -> Result<Success> {
    let viewer = state.session.require_viewer()?.to_owned();
    require_access(state, &viewer, picture, Access::Read)?;

    let count = state.pictures.get(picture)?.comments.len();
    let text = state.pictures.read_comments(picture)?;
    Ok(Success {
        message: format!(
            "Friend {} read {} comment(s) on picture {}",
            viewer, count, picture
        ),
        output: Some(text),
    })
}

fn write_comments(
    state: &mut ProfileState,
    picture: &str,
    text: &str,
) -> Result<Success> {
    let viewer = state.session.require_viewer()?.to_owned();
    require_access(state, &viewer, picture, Access::Write)?;

    state.pictures.append_comment(picture, text)?;
    Ok(Success::message(format!(
        "Friend {} commented on picture {}: {}",
        viewer, picture, text
    )))
}
