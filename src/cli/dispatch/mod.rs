//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action the binary executes.

use crate::cli::actions::{report, server, Action};
use crate::cli::commands;
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::net::{IpAddr, Ipv6Addr};
use url::Url;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((commands::server::NAME, sub_m)) => Ok(Action::Server(server::Args {
            port: sub_m
                .get_one::<u16>(commands::server::ARG_PORT)
                .copied()
                .unwrap_or(8000),
            listen: sub_m
                .get_one::<IpAddr>(commands::server::ARG_LISTEN)
                .copied()
                .unwrap_or(IpAddr::V6(Ipv6Addr::UNSPECIFIED)),
        })),

        Some((commands::report::NAME, sub_m)) => {
            let url = sub_m
                .get_one::<String>(commands::report::ARG_URL)
                .context("missing required argument: --url")?;
            let url = Url::parse(url).with_context(|| format!("Invalid team API URL: {url}"))?;

            let login = sub_m
                .get_one::<String>(commands::report::ARG_LOGIN)
                .cloned()
                .context("missing required argument: --login")?;

            let password = sub_m
                .get_one::<String>(commands::report::ARG_PASSWORD)
                .cloned()
                .map(SecretString::from)
                .context("missing required argument: --password")?;

            Ok(Action::Report(report::Args {
                url,
                login,
                password,
                team: sub_m
                    .get_one::<String>(commands::report::ARG_TEAM)
                    .filter(|team| !team.is_empty())
                    .cloned(),
            }))
        }

        Some((name, _)) => Err(anyhow!("unknown subcommand: {name}")),
        None => Err(anyhow!("missing subcommand")),
    }
}
