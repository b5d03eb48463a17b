//! Route handlers for the directory API.
//!
//! Handlers never fail: every directory outcome maps onto a status code and
//! the stores stay valid whatever the request carried.

pub mod health;
pub mod teams;
pub mod users;

use axum::body::Bytes;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Decode a JSON request body whatever `Content-Type` the client sent.
pub(crate) fn decode<T: DeserializeOwned>(body: &Bytes) -> Option<T> {
    serde_json::from_slice(body)
        .map_err(|err| debug!("Failed to decode payload: {err}"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::teams::TeamPayload;

    #[test]
    fn decode_ignores_missing_fields_but_not_garbage() {
        let payload: Option<TeamPayload> = decode(&Bytes::from_static(br#"{"name":"red"}"#));
        assert_eq!(payload.map(|team| team.name).as_deref(), Some("red"));

        assert!(decode::<TeamPayload>(&Bytes::from_static(b"{not json")).is_none());
        assert!(decode::<TeamPayload>(&Bytes::new()).is_none());
    }
}
