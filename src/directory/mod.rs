//! In-memory directories of users and teams.
//!
//! Locking discipline:
//! 1) Each directory guards its key -> record map with one lock.
//! 2) Each team guards its own membership set with a second, finer lock.
//! 3) A directory lock is always released before a team lock is taken, so a
//!    listing never waits on membership churn and the two tiers cannot deadlock.

pub mod teams;
pub mod users;

pub use self::teams::{Team, TeamDirectory, TeamView};
pub use self::users::{verify, User, UserDirectory, UserView};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("nothing to change")]
    NoOp,
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Process-wide stores shared by every request task.
#[derive(Debug, Default)]
pub struct Directories {
    pub users: UserDirectory,
    pub teams: TeamDirectory,
}

impl Directories {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
