//! Self-service user endpoints.
//!
//! Flow Overview:
//! 1) `PUT /api/user` creates an account without credentials.
//! 2) `GET /api/user` returns the authenticated user's public fields.
//! 3) `POST /api/user` replaces the authenticated user's mutable fields.

use axum::{body::Bytes, extract::Extension, http::StatusCode, response::IntoResponse, Json};
use secrecy::SecretString;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use crate::api::{auth::Principal, handlers::decode};
use crate::directory::{Directories, DirectoryError, User, UserView};

/// Create and update payload. Missing fields decode as empty strings; the
/// lowercase aliases keep older clients working.
#[derive(Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPayload {
    #[serde(alias = "email")]
    pub identifier: String,
    #[serde(alias = "firstname")]
    pub first_name: String,
    #[serde(alias = "lastname")]
    pub last_name: String,
    #[serde(alias = "password")]
    pub secret: String,
}

impl std::fmt::Debug for UserPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserPayload")
            .field("identifier", &self.identifier)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("secret", &"***")
            .finish()
    }
}

impl From<UserPayload> for User {
    fn from(payload: UserPayload) -> Self {
        Self::new(
            payload.identifier,
            payload.first_name,
            payload.last_name,
            SecretString::from(payload.secret),
        )
    }
}

#[utoipa::path(
    put,
    path = "/api/user",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created."),
        (status = 304, description = "A user with this identifier already exists."),
        (status = 400, description = "Identifier or secret missing."),
    ),
    tag = "user"
)]
pub async fn create_user(
    Extension(directories): Extension<Arc<Directories>>,
    body: Bytes,
) -> impl IntoResponse {
    let Some(payload) = decode::<UserPayload>(&body) else {
        warn!("Undecodable payload - user not created.");
        return StatusCode::BAD_REQUEST;
    };

    if payload.identifier.is_empty() {
        warn!("Identifier missing - user not created.");
        return StatusCode::BAD_REQUEST;
    }

    if payload.secret.is_empty() {
        warn!("Secret missing - user not created.");
        return StatusCode::BAD_REQUEST;
    }

    let identifier = payload.identifier.clone();

    match directories.users.insert(payload.into()) {
        Ok(()) => {
            info!("User [{identifier}] created.");
            StatusCode::CREATED
        }
        Err(_) => {
            info!("User [{identifier}] not created (already exists).");
            StatusCode::NOT_MODIFIED
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "The authenticated user.", body = UserView),
        (status = 204, description = "The authenticated user no longer resolves."),
        (status = 401, description = "Missing or invalid credentials."),
    ),
    security(("basic" = [])),
    tag = "user"
)]
pub async fn get_user(
    Extension(principal): Extension<Principal>,
    Extension(directories): Extension<Arc<Directories>>,
) -> impl IntoResponse {
    match directories.users.get_by_identifier(&principal.identifier) {
        Ok(user) => {
            debug!("User [{}] read their record.", principal.identifier);
            (StatusCode::OK, Json(UserView::from(&user))).into_response()
        }
        Err(_) => StatusCode::NO_CONTENT.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/user",
    request_body = UserPayload,
    responses(
        (status = 202, description = "User updated."),
        (status = 304, description = "No matching user."),
        (status = 400, description = "Undecodable payload or empty secret."),
        (status = 401, description = "Missing or invalid credentials."),
        (status = 403, description = "The payload targets another user."),
    ),
    security(("basic" = [])),
    tag = "user"
)]
pub async fn update_user(
    Extension(principal): Extension<Principal>,
    Extension(directories): Extension<Arc<Directories>>,
    body: Bytes,
) -> impl IntoResponse {
    let Some(mut payload) = decode::<UserPayload>(&body) else {
        warn!("Undecodable payload - user not modified.");
        return StatusCode::BAD_REQUEST;
    };

    if payload.identifier.is_empty() {
        payload.identifier.clone_from(&principal.identifier);
    }

    if payload.identifier != principal.identifier {
        warn!(
            "User [{}] tried to modify [{}].",
            principal.identifier, payload.identifier
        );
        return StatusCode::FORBIDDEN;
    }

    if payload.secret.is_empty() {
        warn!("Secret missing - user [{}] not modified.", principal.identifier);
        return StatusCode::BAD_REQUEST;
    }

    match directories.users.update(payload.into()) {
        Ok(()) => {
            info!("User [{}] modified.", principal.identifier);
            StatusCode::ACCEPTED
        }
        Err(DirectoryError::NotFound(identifier)) => {
            info!("User [{identifier}] not modified (not found).");
            StatusCode::NOT_MODIFIED
        }
        Err(err) => {
            info!("User [{}] not modified: {err}", principal.identifier);
            StatusCode::NOT_MODIFIED
        }
    }
}
