//! Integration tests for settings resolution from the environment
//!
//! Note: every test here mutates process environment variables and holds
//! ENV_MUTEX for its whole body.

use nos_config_collector::config::{load_config, LoadOptions};
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const REQUIRED: &[(&str, &str)] = &[
    ("NCC_CONFIG_DIRECTORY", "/srv/collection"),
    ("NCC_REPOSITORY_URL", "https://github.com/test-owner/configs.git"),
    ("NCC_REPOSITORY_OWNER", "test-owner"),
    ("NCC_REPOSITORY_NAME", "configs"),
    ("NCC_GITHUB_TOKEN", "env-token"),
];

const OPTIONAL: &[&str] = &[
    "NCC_DEV_MODE",
    "NCC_BASE_BRANCH",
    "NCC_PORT",
    "NCC_HOST",
    "NCC_LOG_LEVEL",
    "NCC_NOS_CATEGORIES",
    "NCC_ANONYMIZE_IP",
];

fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
}

/// Helper function to reset every variable these tests touch
fn cleanup_env_vars() {
    for (key, _) in REQUIRED {
        std::env::remove_var(key);
    }
    for key in OPTIONAL {
        std::env::remove_var(key);
    }
}

fn set_required_env_vars() {
    for (key, value) in REQUIRED {
        std::env::set_var(key, value);
    }
}

fn env_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_load_from_environment() {
    let _lock = lock_env();
    cleanup_env_vars();
    set_required_env_vars();
    std::env::set_var("NCC_BASE_BRANCH", "develop");
    std::env::set_var("NCC_PORT", "9090");
    std::env::set_var("NCC_NOS_CATEGORIES", "vyos,cisco_ios");

    let config = load_config(&LoadOptions::default()).unwrap();

    assert!(!config.application.dev_mode);
    assert_eq!(config.repository.base_branch, "develop");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.nos_categories, vec!["vyos", "cisco_ios"]);
    assert_eq!(config.github.owner, "test-owner");
    assert_eq!(config.github.token.expose_secret(), "env-token");

    cleanup_env_vars();
}

#[test]
fn test_missing_required_variables() {
    let _lock = lock_env();
    cleanup_env_vars();
    std::env::set_var("NCC_CONFIG_DIRECTORY", "/srv/collection");

    let err = load_config(&LoadOptions::default()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("NCC_REPOSITORY_URL"));
    assert!(msg.contains("NCC_GITHUB_TOKEN"));
    assert!(!msg.contains("NCC_CONFIG_DIRECTORY"));

    cleanup_env_vars();
}

#[test]
fn test_dev_override_file_takes_precedence() {
    let _lock = lock_env();
    cleanup_env_vars();
    set_required_env_vars();
    std::env::set_var("NCC_BASE_BRANCH", "from-env");

    let file = env_file(&["NCC_BASE_BRANCH=from-file", "ncc_log_level=debug"]);
    let options = LoadOptions {
        dev_mode: true,
        env_file: Some(file.path().to_path_buf()),
    };
    let config = load_config(&options).unwrap();

    assert!(config.application.dev_mode);
    assert_eq!(config.repository.base_branch, "from-file");
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.github.token.expose_secret(), "env-token");

    cleanup_env_vars();
}

#[test]
fn test_override_file_ignored_outside_dev_mode() {
    let _lock = lock_env();
    cleanup_env_vars();
    set_required_env_vars();

    let file = env_file(&["NCC_BASE_BRANCH=from-file"]);
    let options = LoadOptions {
        dev_mode: false,
        env_file: Some(file.path().to_path_buf()),
    };
    let config = load_config(&options).unwrap();

    assert_eq!(config.repository.base_branch, "main");

    cleanup_env_vars();
}

#[test]
fn test_override_file_supplies_required_values() {
    let _lock = lock_env();
    cleanup_env_vars();

    let file = env_file(&[
        "NCC_CONFIG_DIRECTORY=/tmp/collection",
        "NCC_REPOSITORY_URL=https://github.com/file-owner/configs.git",
        "NCC_REPOSITORY_OWNER=file-owner",
        "NCC_REPOSITORY_NAME=configs",
        "NCC_GITHUB_TOKEN=file-token",
    ]);
    let options = LoadOptions {
        dev_mode: true,
        env_file: Some(file.path().to_path_buf()),
    };
    let config = load_config(&options).unwrap();

    assert_eq!(config.github.owner, "file-owner");
    assert_eq!(config.github.token.expose_secret(), "file-token");

    cleanup_env_vars();
}

#[test]
fn test_explicit_missing_override_file_is_error() {
    let _lock = lock_env();
    cleanup_env_vars();
    set_required_env_vars();

    let options = LoadOptions {
        dev_mode: true,
        env_file: Some("/nonexistent/ncc-override.env".into()),
    };
    let err = load_config(&options).unwrap_err();
    assert!(err.to_string().contains("ncc-override.env"));

    cleanup_env_vars();
}

#[test]
fn test_dev_mode_from_environment_flag() {
    let _lock = lock_env();
    cleanup_env_vars();
    set_required_env_vars();
    std::env::set_var("NCC_DEV_MODE", "true");

    let file = env_file(&["NCC_HOST=127.0.0.1"]);
    let options = LoadOptions {
        dev_mode: false,
        env_file: Some(file.path().to_path_buf()),
    };
    let config = load_config(&options).unwrap();

    assert!(config.application.dev_mode);
    assert_eq!(config.server.host, "127.0.0.1");

    cleanup_env_vars();
}

#[test]
fn test_invalid_values_rejected() {
    let _lock = lock_env();
    cleanup_env_vars();
    set_required_env_vars();
    std::env::set_var("NCC_ANONYMIZE_IP", "sometimes");

    assert!(load_config(&LoadOptions::default()).is_err());

    std::env::set_var("NCC_ANONYMIZE_IP", "false");
    std::env::set_var("NCC_DEV_MODE", "maybe");
    assert!(load_config(&LoadOptions::default()).is_err());

    cleanup_env_vars();
}
