use clap::{Arg, Command};

pub const NAME: &str = "report";
pub const ARG_URL: &str = "url";
pub const ARG_LOGIN: &str = "login";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_TEAM: &str = "team";

#[must_use]
pub fn command() -> Command {
    Command::new(NAME)
        .about("Print `name,memberCount` for every team of a running server")
        .arg(
            Arg::new(ARG_URL)
                .short('u')
                .long("url")
                .help("Team API URL")
                .default_value("http://localhost:8000/api/team")
                .env("COHORT_URL"),
        )
        .arg(
            Arg::new(ARG_LOGIN)
                .long("login")
                .help("User identifier used for Basic authentication")
                .env("COHORT_LOGIN")
                .required(true),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long("password")
                .help("User secret used for Basic authentication")
                .env("COHORT_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_TEAM)
                .short('t')
                .long("team")
                .help("Only print this team, all teams if omitted")
                .env("COHORT_TEAM"),
        )
}
