// nos-config-collector - Network device configuration collector
// Copyright (c) 2025 nos-config-collector Contributors
// Licensed under the MIT License

use clap::Parser;
use nos_config_collector::cli::{Cli, Commands};
use nos_config_collector::config::{load_config, LoggingConfig};
use nos_config_collector::logging::init_logging;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Optional; a missing .env is ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let loaded = load_config(&cli.load_options());

    // File logging only applies to the long-running service
    let logging_config = match (&cli.command, &loaded) {
        (Commands::Serve(_), Ok(config)) => config.logging.clone(),
        _ => LoggingConfig::default(),
    };
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());

    // Keep the guard alive so the file writer flushes on exit
    let _logging_guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "nos-config-collector"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => {
                            tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
                        }
                        _ = sigterm.recv() => {
                            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                    let _ = tokio::signal::ctrl_c().await;
                    tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                return;
            }
            tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
        }

        let _ = shutdown_tx.send(true);
    });

    let exit_code = match execute_command(&cli, loaded, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    drop(_logging_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(
    cli: &Cli,
    loaded: nos_config_collector::domain::Result<nos_config_collector::config::CollectorConfig>,
    shutdown_signal: watch::Receiver<bool>,
) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Serve(args) => match loaded {
            Ok(config) => args.execute(config, shutdown_signal).await,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                Ok(2)
            }
        },
        Commands::ValidateConfig(args) => args.execute(loaded).await,
    }
}
