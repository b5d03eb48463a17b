use crate::{api, directory::Directories};
use anyhow::Result;
use std::{net::IpAddr, sync::Arc};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub listen: IpAddr,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    // The directories live for the whole process and are shared by every request.
    let directories = Arc::new(Directories::new());

    api::new(args.listen, args.port, directories).await
}
