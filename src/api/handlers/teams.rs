//! Team endpoints: creation, lookup, listing and membership.
//!
//! Membership changes resolve the authenticated identifier back to its user
//! record first, then the team by path name, and only then take the team's
//! own lock.

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use crate::api::{auth::Principal, handlers::decode};
use crate::directory::{Directories, DirectoryError, Team, TeamView, User};

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct TeamPayload {
    pub name: String,
    pub description: String,
}

#[utoipa::path(
    get,
    path = "/api/team",
    responses(
        (status = 200, description = "All teams, ascending by name.", body = [TeamView]),
        (status = 401, description = "Missing or invalid credentials."),
    ),
    security(("basic" = [])),
    tag = "team"
)]
pub async fn list_teams(Extension(directories): Extension<Arc<Directories>>) -> impl IntoResponse {
    let teams = directories.teams.snapshot();
    debug!("Returning {} teams.", teams.len());
    (StatusCode::OK, Json(teams))
}

#[utoipa::path(
    put,
    path = "/api/team",
    request_body = TeamPayload,
    responses(
        (status = 201, description = "Team created."),
        (status = 304, description = "A team with this name already exists."),
        (status = 400, description = "Team name missing or contains '/'."),
        (status = 401, description = "Missing or invalid credentials."),
    ),
    security(("basic" = [])),
    tag = "team"
)]
pub async fn create_team(
    Extension(directories): Extension<Arc<Directories>>,
    body: Bytes,
) -> impl IntoResponse {
    let Some(payload) = decode::<TeamPayload>(&body) else {
        warn!("Undecodable payload - team not created.");
        return StatusCode::BAD_REQUEST;
    };

    if payload.name.is_empty() {
        warn!("Team name is missing - team not created.");
        return StatusCode::BAD_REQUEST;
    }

    // the name is a single path segment in /api/team/:name
    if payload.name.contains('/') {
        warn!("Team name [{}] contains '/' - team not created.", payload.name);
        return StatusCode::BAD_REQUEST;
    }

    let name = payload.name.clone();

    match directories
        .teams
        .insert(Team::new(payload.name, payload.description))
    {
        Ok(()) => {
            info!("Team [{name}] created.");
            StatusCode::CREATED
        }
        Err(_) => {
            info!("Team [{name}] not created (already exists).");
            StatusCode::NOT_MODIFIED
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/team/{name}",
    params(
        ("name" = String, Path, description = "Team name")
    ),
    responses(
        (status = 200, description = "The team.", body = TeamView),
        (status = 204, description = "No such team."),
        (status = 401, description = "Missing or invalid credentials."),
    ),
    security(("basic" = [])),
    tag = "team"
)]
pub async fn get_team(
    Path(name): Path<String>,
    Extension(directories): Extension<Arc<Directories>>,
) -> impl IntoResponse {
    match directories.teams.get_by_name(&name) {
        Ok(team) => {
            debug!("Team [{name}] returned.");
            (StatusCode::OK, Json(TeamView::from(team.as_ref()))).into_response()
        }
        Err(_) => {
            debug!("Team [{name}] not found.");
            StatusCode::NO_CONTENT.into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/team/{name}/subscribe",
    params(
        ("name" = String, Path, description = "Team name")
    ),
    responses(
        (status = 202, description = "User added to the team."),
        (status = 304, description = "User already a member."),
        (status = 401, description = "Missing or invalid credentials."),
        (status = 403, description = "Authenticated user could not be resolved."),
        (status = 404, description = "No such team."),
    ),
    security(("basic" = [])),
    tag = "team"
)]
pub async fn subscribe(
    Path(name): Path<String>,
    Extension(principal): Extension<Principal>,
    Extension(directories): Extension<Arc<Directories>>,
) -> impl IntoResponse {
    change_membership(&directories, &principal, &name, Membership::Join)
}

#[utoipa::path(
    post,
    path = "/api/team/{name}/unsubscribe",
    params(
        ("name" = String, Path, description = "Team name")
    ),
    responses(
        (status = 202, description = "User removed from the team."),
        (status = 304, description = "User was not a member."),
        (status = 401, description = "Missing or invalid credentials."),
        (status = 403, description = "Authenticated user could not be resolved."),
        (status = 404, description = "No such team."),
    ),
    security(("basic" = [])),
    tag = "team"
)]
pub async fn unsubscribe(
    Path(name): Path<String>,
    Extension(principal): Extension<Principal>,
    Extension(directories): Extension<Arc<Directories>>,
) -> impl IntoResponse {
    change_membership(&directories, &principal, &name, Membership::Leave)
}

#[derive(Clone, Copy, Debug)]
enum Membership {
    Join,
    Leave,
}

impl Membership {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Join => "added to",
            Self::Leave => "removed from",
        }
    }
}

fn change_membership(
    directories: &Directories,
    principal: &Principal,
    name: &str,
    change: Membership,
) -> StatusCode {
    let user: User = match directories.users.get_by_identifier(&principal.identifier) {
        Ok(user) => user,
        Err(_) => {
            warn!("User [{}] could not be resolved.", principal.identifier);
            return StatusCode::FORBIDDEN;
        }
    };

    let Ok(team) = directories.teams.get_by_name(name) else {
        debug!("Team [{name}] not found.");
        return StatusCode::NOT_FOUND;
    };

    let result = match change {
        Membership::Join => team.subscribe(Some(&user)),
        Membership::Leave => team.unsubscribe(Some(&user)),
    };

    match result {
        Ok(()) => {
            info!(
                "User [{}] {} team [{name}].",
                principal.identifier,
                change.as_str()
            );
            StatusCode::ACCEPTED
        }
        Err(DirectoryError::NoOp) => StatusCode::NOT_MODIFIED,
        Err(err) => {
            warn!("Membership change on team [{name}] failed: {err}");
            StatusCode::NOT_MODIFIED
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn directories() -> Directories {
        let directories = Directories::new();
        directories
            .users
            .insert(User::new(
                "a@x.com",
                "Alice",
                "Doe",
                SecretString::from("p".to_string()),
            ))
            .unwrap();
        directories.teams.insert(Team::new("red", "")).unwrap();
        directories
    }

    fn principal(identifier: &str) -> Principal {
        Principal {
            identifier: identifier.to_string(),
        }
    }

    #[test]
    fn unresolvable_principal_is_forbidden() {
        let directories = directories();
        let status = change_membership(&directories, &principal("ghost@x.com"), "red", Membership::Join);
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(directories.teams.get_by_name("red").unwrap().member_count(), 0);
    }

    #[test]
    fn membership_round_trip() {
        let directories = directories();
        let alice = principal("a@x.com");

        let statuses: Vec<StatusCode> = [
            Membership::Join,
            Membership::Join,
            Membership::Leave,
            Membership::Leave,
        ]
        .into_iter()
        .map(|change| change_membership(&directories, &alice, "red", change))
        .collect();

        assert_eq!(
            statuses,
            [
                StatusCode::ACCEPTED,
                StatusCode::NOT_MODIFIED,
                StatusCode::ACCEPTED,
                StatusCode::NOT_MODIFIED,
            ]
        );
        assert_eq!(
            change_membership(&directories, &alice, "blue", Membership::Join),
            StatusCode::NOT_FOUND
        );
    }
}
