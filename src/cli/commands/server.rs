use clap::{Arg, Command};
use std::net::IpAddr;

pub const NAME: &str = "server";
pub const ARG_PORT: &str = "port";
pub const ARG_LISTEN: &str = "listen";

#[must_use]
pub fn command() -> Command {
    Command::new(NAME)
        .about("Serve the user and team directory API")
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8000")
                .env("COHORT_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_LISTEN)
                .short('l')
                .long("listen")
                .help("Address to bind, IPv4 or IPv6")
                .default_value("::")
                .env("COHORT_LISTEN")
                .value_parser(clap::value_parser!(IpAddr)),
        )
}
