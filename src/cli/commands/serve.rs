//! `serve` command

use crate::config::CollectorConfig;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Override the listen host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the listen port
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Apply command-line overrides to the resolved settings
    pub fn apply(&self, mut config: CollectorConfig) -> Result<CollectorConfig, String> {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        config.validate()?;
        Ok(config)
    }

    /// Run the HTTP service until shutdown; returns the process exit code
    pub async fn execute(
        &self,
        config: CollectorConfig,
        shutdown: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let config = match self.apply(config) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Invalid server settings: {e}");
                return Ok(2);
            }
        };

        tracing::info!(
            address = %config.server.bind_address(),
            base_branch = %config.repository.base_branch,
            "Starting nos-config-collector"
        );

        crate::server::serve(&config, shutdown).await?;

        tracing::info!("Server stopped");
        Ok(0)
    }
}
