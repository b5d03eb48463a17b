pub mod report;
pub mod server;

use crate::cli::telemetry;

#[derive(Debug)]
pub enum Action {
    Server(server::Args),
    Report(report::Args),
}

impl Action {
    /// Execute the action, then flush any exported spans.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        let result = match self {
            Self::Server(args) => server::execute(args).await,
            Self::Report(args) => report::execute(args).await,
        };

        telemetry::shutdown_tracer();

        result
    }
}
