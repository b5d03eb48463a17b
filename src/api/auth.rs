//! Request gate: HTTP Basic credentials checked against the user directory.
//!
//! Flow Overview:
//! 1) Parse `Authorization: Basic base64(identifier:secret)`.
//! 2) Look up the identifier in the user directory.
//! 3) Verify the secret and attach a [`Principal`] to the request.
//!
//! Every failure yields the same `401` with a `WWW-Authenticate` challenge.

use axum::{
    extract::{Extension, Request},
    http::{
        header::{AUTHORIZATION, WWW_AUTHENTICATE},
        HeaderMap, HeaderValue, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64ct::{Base64, Encoding};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::debug;

use crate::directory::{self, Directories, UserDirectory};

pub const CHALLENGE: &str = r#"Basic realm="Restricted""#;

/// Identity attached to a request once the gate admitted it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub identifier: String,
}

#[derive(Debug)]
pub struct Credentials {
    pub identifier: String,
    pub secret: SecretString,
}

/// Extract Basic credentials from the request headers, `None` if malformed.
#[must_use]
pub fn credentials(headers: &HeaderMap) -> Option<Credentials> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = Base64::decode_vec(token.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (identifier, secret) = decoded.split_once(':')?;

    Some(Credentials {
        identifier: identifier.to_string(),
        secret: SecretString::from(secret.to_string()),
    })
}

/// Resolve the request credentials into a principal.
///
/// # Errors
/// Returns `401` if the credentials are missing, malformed, unknown or wrong.
pub fn authenticate(headers: &HeaderMap, users: &UserDirectory) -> Result<Principal, StatusCode> {
    let Some(credentials) = credentials(headers) else {
        debug!("Missing or malformed authorization header");
        return Err(StatusCode::UNAUTHORIZED);
    };

    let record = match users.get_by_identifier(&credentials.identifier) {
        Ok(record) => record,
        Err(_) => {
            debug!("Unknown user [{}]", credentials.identifier);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    if !directory::verify(
        &record,
        &credentials.identifier,
        credentials.secret.expose_secret(),
    ) {
        debug!("Wrong secret for user [{}]", credentials.identifier);
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(Principal {
        identifier: credentials.identifier,
    })
}

/// The `401` returned for every authentication failure.
#[must_use]
pub fn unauthorized() -> Response {
    let mut response = (StatusCode::UNAUTHORIZED, "Not authorized").into_response();
    response
        .headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE));
    response
}

/// Middleware wrapping every protected route.
pub async fn require_basic_auth(
    Extension(directories): Extension<Arc<Directories>>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &directories.users) {
        Ok(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(_) => unauthorized(),
    }
}
