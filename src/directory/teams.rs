use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};
use utoipa::ToSchema;

use super::{DirectoryError, Result, User};

/// A named team and the identifiers of its members.
///
/// Members are referenced by identifier only; the user directory stays the
/// owner of every user record.
#[derive(Debug)]
pub struct Team {
    name: String,
    description: String,
    members: Mutex<HashSet<String>>,
}

impl Team {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            members: Mutex::new(HashSet::new()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Add `user` to the team. `None` is accepted and changes nothing.
    ///
    /// # Errors
    /// Returns [`DirectoryError::NoOp`] if the user is already a member.
    pub fn subscribe(&self, user: Option<&User>) -> Result<()> {
        let Some(user) = user else {
            return Ok(());
        };

        if self.members.lock().insert(user.identifier().to_string()) {
            Ok(())
        } else {
            Err(DirectoryError::NoOp)
        }
    }

    /// Remove `user` from the team. `None` is accepted and changes nothing.
    ///
    /// # Errors
    /// Returns [`DirectoryError::NoOp`] if the user is not a member.
    pub fn unsubscribe(&self, user: Option<&User>) -> Result<()> {
        let Some(user) = user else {
            return Ok(());
        };

        if self.members.lock().remove(user.identifier()) {
            Ok(())
        } else {
            Err(DirectoryError::NoOp)
        }
    }

    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.lock().len()
    }

    #[cfg(test)]
    fn is_member(&self, identifier: &str) -> bool {
        self.members.lock().contains(identifier)
    }
}

/// Public projection of a [`Team`] with its member count resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamView {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub member_count: usize,
}

impl From<&Team> for TeamView {
    fn from(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            description: team.description.clone(),
            member_count: team.member_count(),
        }
    }
}

#[derive(Debug, Default)]
pub struct TeamDirectory {
    teams: RwLock<BTreeMap<String, Arc<Team>>>,
}

impl TeamDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `team` unless its name is already taken.
    ///
    /// # Errors
    /// Returns [`DirectoryError::AlreadyExists`] when a team with that name exists.
    pub fn insert(&self, team: Team) -> Result<()> {
        let mut teams = self.teams.write();

        if teams.contains_key(&team.name) {
            return Err(DirectoryError::AlreadyExists(team.name));
        }

        teams.insert(team.name.clone(), Arc::new(team));

        Ok(())
    }

    /// # Errors
    /// Returns [`DirectoryError::NotFound`] if there is no team named `name`.
    pub fn get_by_name(&self, name: &str) -> Result<Arc<Team>> {
        self.teams
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(name.to_string()))
    }

    /// All teams, ascending by name.
    #[must_use]
    pub fn list_all(&self) -> Vec<Arc<Team>> {
        self.teams.read().values().cloned().collect()
    }

    /// Project every team into its public view.
    ///
    /// The team list is copied under the directory lock, which is dropped
    /// before each member count is read under that team's own lock.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TeamView> {
        self.list_all()
            .iter()
            .map(|team| TeamView::from(team.as_ref()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.teams.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teams.read().is_empty()
    }
}
