//! `validate-config` command
//!
//! Resolves the settings the same way `serve` does and prints a summary with
//! the token redacted.

use crate::config::CollectorConfig;
use crate::domain::Result;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Report on already resolved settings; returns the process exit code
    pub async fn execute(&self, loaded: Result<CollectorConfig>) -> anyhow::Result<i32> {
        tracing::info!("Validating configuration");

        let config = match loaded {
            Ok(config) => config,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        print!("{}", summary(&config));
        Ok(0)
    }
}

/// Human-readable summary; never includes the token
pub fn summary(config: &CollectorConfig) -> String {
    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Listen Address: {}", config.server.bind_address()),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Dev Mode: {}", config.application.dev_mode),
        format!(
            "  Working Copy: {}",
            config.repository.config_directory.display()
        ),
        format!(
            "  Remote: {}",
            crate::adapters::git::redacted_url(&config.repository.url)
        ),
        format!("  Base Branch: {}", config.repository.base_branch),
        format!(
            "  GitHub Repository: {}/{}",
            config.github.owner, config.github.name
        ),
        format!("  GitHub API: {}", config.github.api_url),
        "  GitHub Token: [REDACTED]".to_string(),
        format!("  Request Timeout: {}s", config.github.timeout_seconds),
        format!(
            "  Anonymize IPs / Passwords: {} / {}",
            config.anonymization.anon_ip, config.anonymization.anon_pwd
        ),
        format!(
            "  NOS Categories: {}",
            config.server.form_categories().join(", ")
        ),
    ];
    if config.logging.local_enabled {
        lines.push(format!(
            "  File Logging: {} ({})",
            config.logging.local_path, config.logging.local_rotation
        ));
    }
    lines.push(String::new());
    lines.join("\n")
}
