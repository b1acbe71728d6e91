pub mod audit;
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod friends;
pub mod lists;
pub mod mode;
pub mod pictures;
pub mod resolver;
pub mod session;
pub mod state;
pub mod storage;

pub use audit::{AuditSink, FileAudit, MemoryAudit};
pub use command::Instruction;
pub use config::Config;
pub use dispatcher::{Dispatcher, Outcome, RunSummary};
pub use errors::{ErrorCategory, ProfileError, Result};
pub use mode::{Access, Mode, Permissions};
pub use state::ProfileState;
pub use storage::ProfileStorage;

/// Friends, the profile owner included, are identified by name.
pub type Identity = String;

/// List name meaning "no list".
pub const NIL_LIST: &str = "nil";

pub const FRIENDS_FILE: &str = "friends.txt";
pub const LISTS_FILE: &str = "list.txt";
pub const PICTURES_FILE: &str = "pictures.txt";
pub const AUDIT_FILE: &str = "audit.txt";
/// Directory a save is written to before it is moved into place.
pub const STAGING_DIR: &str = ".staging";

/// Management files share the data directory with picture files, so
/// pictures cannot take their names.
pub const RESERVED_FILES: [&str; 5] =
    [FRIENDS_FILE, LISTS_FILE, PICTURES_FILE, AUDIT_FILE, STAGING_DIR];
