//! Reporting client: fetch the team listing and print member counts.

use anyhow::{anyhow, Context, Result};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::fmt::Write as _;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::directory::TeamView;

/// Fetch every team from the `GET /api/team` endpoint at `url`.
///
/// # Errors
/// Returns an error if the request fails, credentials are rejected, the server
/// answers anything but `200`, or the body is not a team listing.
#[instrument(skip(password))]
pub async fn fetch_teams(url: &Url, login: &str, password: &SecretString) -> Result<Vec<TeamView>> {
    let client = Client::builder()
        .user_agent(crate::APP_USER_AGENT)
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .get(url.clone())
        .basic_auth(login, Some(password.expose_secret()))
        .send()
        .await
        .with_context(|| format!("Request to {url} failed"))?;

    match response.status() {
        StatusCode::OK => {
            let teams = response
                .json::<Vec<TeamView>>()
                .await
                .context("Failed to decode team listing")?;
            info!("Request processed successfully.");
            debug!("Received {} teams", teams.len());
            Ok(teams)
        }
        StatusCode::UNAUTHORIZED => {
            error!("Request processed unsuccessfully [401] - unauthorized");
            Err(anyhow!("unauthorized"))
        }
        status => {
            error!("Request processed unsuccessfully [{}]", status.as_u16());
            Err(anyhow!("unexpected response status: {status}"))
        }
    }
}

/// Render one `name,memberCount` line per team, optionally only for `team`.
#[must_use]
pub fn render(teams: &[TeamView], team: Option<&str>) -> String {
    teams
        .iter()
        .filter(|view| team.map_or(true, |name| name == view.name))
        .fold(String::new(), |mut out, view| {
            let _ = writeln!(out, "{},{}", view.name, view.member_count);
            out
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams() -> Vec<TeamView> {
        vec![
            TeamView {
                name: "blue".to_string(),
                description: String::new(),
                member_count: 0,
            },
            TeamView {
                name: "red".to_string(),
                description: "the red team".to_string(),
                member_count: 3,
            },
        ]
    }

    #[test]
    fn render_all_teams() {
        assert_eq!(render(&teams(), None), "blue,0\nred,3\n");
    }

    #[test]
    fn render_filters_by_exact_name() {
        assert_eq!(render(&teams(), Some("red")), "red,3\n");
        assert_eq!(render(&teams(), Some("re")), "");
    }

    #[test]
    fn render_empty_listing() {
        assert_eq!(render(&[], None), "");
    }
}
