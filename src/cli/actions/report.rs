use crate::report;
use anyhow::Result;
use secrecy::SecretString;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub url: Url,
    pub login: String,
    pub password: SecretString,
    pub team: Option<String>,
}

/// Execute the report action.
/// # Errors
/// Returns an error if the team listing cannot be fetched.
pub async fn execute(args: Args) -> Result<()> {
    let teams = report::fetch_teams(&args.url, &args.login, &args.password).await?;

    print!("{}", report::render(&teams, args.team.as_deref()));

    Ok(())
}
