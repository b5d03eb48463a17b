//! # Cohort (user and team directory)
//!
//! `cohort` keeps an in-memory directory of users and teams and records which
//! users belong to which teams.
//!
//! ## Authentication
//!
//! Every route except user creation requires HTTP Basic credentials, where the
//! username is the user identifier. Any credential problem (malformed header,
//! unknown identifier, wrong secret) yields the same `401` so identifiers cannot
//! be enumerated.
//!
//! ## Authorization
//!
//! A user may read and modify only their own record. Any authenticated user may
//! create teams and join or leave them.
//!
//! ## Reporting
//!
//! `cohort report` fetches the team listing from a running server and prints
//! one `name,memberCount` line per team.

pub mod api;
pub mod cli;
pub mod directory;
pub mod report;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
