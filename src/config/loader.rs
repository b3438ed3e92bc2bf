//! Configuration loader with environment variables and a development override file
//!
//! Settings come from `NCC_*` environment variables. In development mode a
//! local `config.env` file is read as well and its entries take precedence
//! over the process environment.

use super::schema::{
    self, ApplicationConfig, CollectorConfig, GitHubConfig, LoggingConfig, RepositoryConfig,
    ServerConfig,
};
use super::secret_string;
use crate::anonymization::AnonymizationConfig;
use crate::domain::errors::CollectorError;
use crate::domain::result::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default development override file, relative to the working directory
pub const DEV_ENV_FILE: &str = "config.env";

/// Environment variable enabling development mode
pub const DEV_MODE_VAR: &str = "NCC_DEV_MODE";

/// How [`load_config`] should resolve settings
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Force development mode regardless of `NCC_DEV_MODE`
    pub dev_mode: bool,

    /// Override file to read in development mode (defaults to [`DEV_ENV_FILE`])
    pub env_file: Option<PathBuf>,
}

/// Loads configuration from the process environment
///
/// This function:
/// 1. Determines development mode (`options.dev_mode` or `NCC_DEV_MODE`)
/// 2. In development mode, reads the override file
/// 3. Resolves every setting, override file first, then the environment
/// 4. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - Required variables are missing
/// - A value cannot be parsed
/// - An explicitly requested override file cannot be read
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use nos_config_collector::config::{load_config, LoadOptions};
///
/// let config = load_config(&LoadOptions::default()).expect("Failed to load config");
/// println!("Storing configurations in {}", config.repository.config_directory.display());
/// ```
pub fn load_config(options: &LoadOptions) -> Result<CollectorConfig> {
    let dev_mode = options.dev_mode || parse_flag(DEV_MODE_VAR, std::env::var(DEV_MODE_VAR).ok())?;

    let overrides = if dev_mode {
        match &options.env_file {
            Some(path) => read_env_file(path)?,
            None => {
                let path = Path::new(DEV_ENV_FILE);
                if path.is_file() {
                    read_env_file(path)?
                } else {
                    tracing::debug!(path = DEV_ENV_FILE, "No development override file found");
                    HashMap::new()
                }
            }
        }
    } else {
        HashMap::new()
    };

    let mut config = config_from_lookup(|key| {
        overrides
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
    })?;
    config.application.dev_mode = dev_mode;

    Ok(config)
}

/// Builds and validates a configuration from an arbitrary key lookup
///
/// Keys are the upper-case `NCC_*` variable names.
pub fn config_from_lookup<F>(lookup: F) -> Result<CollectorConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let mut missing = Vec::new();
    let mut required = |key: &'static str| match get(key) {
        Some(value) => value,
        None => {
            missing.push(key);
            String::new()
        }
    };

    let config_directory = required("NCC_CONFIG_DIRECTORY");
    let url = required("NCC_REPOSITORY_URL");
    let owner = required("NCC_REPOSITORY_OWNER");
    let name = required("NCC_REPOSITORY_NAME");
    let token = required("NCC_GITHUB_TOKEN");

    if !missing.is_empty() {
        return Err(CollectorError::Configuration(format!(
            "Missing required environment variables: {}",
            missing.join(", ")
        )));
    }

    let mut anonymization = AnonymizationConfig::default();
    if let Some(salt) = get("NCC_ANONYMIZATION_SALT") {
        anonymization.salt = salt;
    }
    anonymization.anon_ip = parse_or("NCC_ANONYMIZE_IP", get("NCC_ANONYMIZE_IP"), true)?;
    anonymization.anon_pwd =
        parse_or("NCC_ANONYMIZE_PASSWORDS", get("NCC_ANONYMIZE_PASSWORDS"), true)?;
    if let Some(words) = get("NCC_RESERVED_WORDS") {
        anonymization.reserved_words = split_list(&words);
    }

    let config = CollectorConfig {
        application: ApplicationConfig {
            log_level: get("NCC_LOG_LEVEL")
                .map(|v| v.to_lowercase())
                .unwrap_or_else(schema::default_log_level),
            dev_mode: false,
        },
        server: ServerConfig {
            host: get("NCC_HOST").unwrap_or_else(schema::default_host),
            port: parse_or("NCC_PORT", get("NCC_PORT"), schema::default_port())?,
            nos_categories: get("NCC_NOS_CATEGORIES")
                .map(|v| split_list(&v))
                .unwrap_or_else(schema::default_nos_categories),
        },
        repository: RepositoryConfig {
            config_directory: PathBuf::from(config_directory),
            url,
            base_branch: get("NCC_BASE_BRANCH").unwrap_or_else(schema::default_base_branch),
            author_name: get("NCC_GIT_AUTHOR_NAME").unwrap_or_else(schema::default_author_name),
            author_email: get("NCC_GIT_AUTHOR_EMAIL")
                .unwrap_or_else(schema::default_author_email),
        },
        github: GitHubConfig {
            owner,
            name,
            token: secret_string(token),
            api_url: get("NCC_GITHUB_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(schema::default_api_url),
            timeout_seconds: parse_or(
                "NCC_REQUEST_TIMEOUT_SECONDS",
                get("NCC_REQUEST_TIMEOUT_SECONDS"),
                schema::default_timeout_seconds(),
            )?,
        },
        anonymization,
        logging: LoggingConfig {
            local_enabled: parse_or(
                "NCC_LOG_LOCAL_ENABLED",
                get("NCC_LOG_LOCAL_ENABLED"),
                false,
            )?,
            local_path: get("NCC_LOG_LOCAL_PATH").unwrap_or_else(schema::default_local_path),
            local_rotation: get("NCC_LOG_LOCAL_ROTATION")
                .map(|v| v.to_lowercase())
                .unwrap_or_else(schema::default_local_rotation),
        },
    };

    config.validate().map_err(|e| {
        CollectorError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Reads `KEY=value` pairs from an env-format file
///
/// Keys are upper-cased so the file may use either case.
fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let iter = dotenvy::from_path_iter(path).map_err(|e| {
        CollectorError::Configuration(format!(
            "Failed to read override file {}: {e}",
            path.display()
        ))
    })?;

    let mut values = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| {
            CollectorError::Configuration(format!(
                "Failed to parse override file {}: {e}",
                path.display()
            ))
        })?;
        values.insert(key.to_uppercase(), value);
    }

    tracing::info!(
        path = %path.display(),
        entries = values.len(),
        "Loaded development override file"
    );
    Ok(values)
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T> {
    match value {
        Some(raw) => raw.trim().parse().map_err(|_| {
            CollectorError::Configuration(format!("Invalid value for {key}: '{raw}'"))
        }),
        None => Ok(default),
    }
}

fn parse_flag(key: &str, value: Option<String>) -> Result<bool> {
    match value.as_deref().map(|v| v.trim().to_lowercase()) {
        None => Ok(false),
        Some(v) if v.is_empty() || v == "0" || v == "false" || v == "no" => Ok(false),
        Some(v) if v == "1" || v == "true" || v == "yes" => Ok(true),
        Some(v) => Err(CollectorError::Configuration(format!(
            "Invalid value for {key}: '{v}'"
        ))),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn base_env() -> HashMap<String, String> {
        [
            ("NCC_CONFIG_DIRECTORY", "/srv/collection"),
            ("NCC_REPOSITORY_URL", "https://github.com/test-owner/configs.git"),
            ("NCC_REPOSITORY_OWNER", "test-owner"),
            ("NCC_REPOSITORY_NAME", "configs"),
            ("NCC_GITHUB_TOKEN", "not-a-token"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_defaults_applied() {
        let env = base_env();
        let config = config_from_lookup(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.repository.base_branch, "main");
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.timeout_seconds, 15);
        assert_eq!(config.github.token.expose_secret(), "not-a-token");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.application.log_level, "info");
        assert!(config.anonymization.anon_ip);
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_missing_required_lists_all() {
        let env: HashMap<String, String> = HashMap::new();
        let err = config_from_lookup(|k| env.get(k).cloned()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("NCC_CONFIG_DIRECTORY"));
        assert!(msg.contains("NCC_GITHUB_TOKEN"));
    }

    #[test]
    fn test_overrides_parsed() {
        let mut env = base_env();
        env.insert("NCC_BASE_BRANCH".into(), "develop".into());
        env.insert("NCC_REQUEST_TIMEOUT_SECONDS".into(), "30".into());
        env.insert("NCC_NOS_CATEGORIES".into(), "vyos, cisco_ios,,".into());
        env.insert("NCC_LOG_LEVEL".into(), "DEBUG".into());
        env.insert("NCC_GITHUB_API_URL".into(), "http://localhost:1234/".into());

        let config = config_from_lookup(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.repository.base_branch, "develop");
        assert_eq!(config.github.timeout_seconds, 30);
        assert_eq!(config.server.nos_categories, vec!["vyos", "cisco_ios"]);
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.github.api_url, "http://localhost:1234");
    }

    #[test]
    fn test_invalid_number_rejected() {
        let mut env = base_env();
        env.insert("NCC_PORT".into(), "eighty".into());
        assert!(config_from_lookup(|k| env.get(k).cloned()).is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(!parse_flag("X", None).unwrap());
        assert!(parse_flag("X", Some("true".into())).unwrap());
        assert!(parse_flag("X", Some("1".into())).unwrap());
        assert!(!parse_flag("X", Some("false".into())).unwrap());
        assert!(parse_flag("X", Some("maybe".into())).is_err());
    }

    #[test]
    fn test_read_env_file_uppercases_keys() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ncc_base_branch=trunk").unwrap();
        writeln!(file, "NCC_PORT=9000").unwrap();
        file.flush().unwrap();

        let values = read_env_file(file.path()).unwrap();
        assert_eq!(values.get("NCC_BASE_BRANCH").map(String::as_str), Some("trunk"));
        assert_eq!(values.get("NCC_PORT").map(String::as_str), Some("9000"));
    }

    #[test]
    fn test_read_env_file_missing() {
        assert!(read_env_file(Path::new("/nonexistent/config.env")).is_err());
    }
}
