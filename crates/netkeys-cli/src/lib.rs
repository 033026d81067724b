// ABOUTME: Library side of the netkeys binary: config bootstrap and process outcome.
// ABOUTME: Connects to the identity directory and runs one key lookup per invocation.

use anyhow::{Context, Result};
use netkeys_core::{ExitStatus, LookupRequest, ServiceIdentity};
use netkeys_grpc::GrpcIdentityService;
use std::io::Write;

pub mod cli;
pub mod config;

pub use cli::Cli;
pub use config::{Config, ConfigError};

/// Load config and connect to the identity directory.
pub async fn connect(cli: &Cli) -> Result<GrpcIdentityService> {
    let config = Config::discover(cli.config.as_deref())
        .context("Error reading config")?
        .with_server(cli.server.clone());
    let channel = config
        .channel_config()
        .context("Error reading config")?;

    let service = ServiceIdentity::new(cli.service.as_str());
    GrpcIdentityService::connect(&channel, &service)
        .await
        .context("Error during client initialization")
}

/// Run one lookup: keys go to `out`, failure details to `err`.
pub async fn run<W, E>(cli: &Cli, out: &mut W, err: &mut E) -> ExitStatus
where
    W: Write,
    E: Write,
{
    let service = match connect(cli).await {
        Ok(service) => service,
        Err(e) => {
            tracing::warn!(error = %e, "client setup failed");
            let _ = writeln!(err, "{e:#}");
            return ExitStatus::LookupFailed;
        }
    };

    let request = LookupRequest::new(cli.id.as_str(), &cli.key_type);
    match netkeys_core::run(&service, &request, out).await {
        Ok(status) => status,
        Err(e) => {
            tracing::error!(error = %e, "lookup failed");
            let _ = writeln!(err, "{e}");
            e.exit_status()
        }
    }
}
