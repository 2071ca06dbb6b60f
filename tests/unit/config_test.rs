//! Tests for configuration loading and validation

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use thanks_sender::config::{AppConfig, ConfigError, ServerConfig, StoreBackendConfig};

fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
    let env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    AppConfig::from_lookup(|key| env.get(key).cloned())
}

const REQUIRED: [(&str, &str); 3] = [
    ("SENDER_EMAIL", "bot@example.com"),
    ("SENDER_PASSWORD", "hunter2"),
    ("SENDER_TAKERS_API", "https://api.example.com"),
];

fn with_required(extra: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
    REQUIRED.iter().copied().chain(extra.iter().copied()).collect()
}

#[test]
fn test_defaults() {
    let config = load(&REQUIRED).unwrap();

    assert_eq!(config.email, "bot@example.com");
    assert_eq!(config.log_level, "info");
    assert_eq!(config.http_timeout, Duration::from_secs(30));
    assert_eq!(config.store, StoreBackendConfig::InMemory);
    assert_eq!(config.server, ServerConfig::default());
    assert_eq!(config.server.update_interval, Duration::from_secs(60));
    assert_eq!(config.server.poll_interval, Duration::from_secs(5));
    assert_eq!(config.server.send_thanks_timeout, Duration::from_secs(10));
}

#[test]
fn test_missing_required_variable() {
    let err = load(&REQUIRED[..2]).unwrap_err();
    assert!(matches!(err, ConfigError::Missing(ref key) if key == "SENDER_TAKERS_API"));
}

#[test]
fn test_blank_required_variable_counts_as_missing() {
    let vars = [
        ("SENDER_EMAIL", "   "),
        ("SENDER_PASSWORD", "hunter2"),
        ("SENDER_TAKERS_API", "https://api.example.com"),
    ];
    assert!(matches!(load(&vars), Err(ConfigError::Missing(_))));
}

#[test]
fn test_timings_override() {
    let config = load(&with_required(&[
        ("SENDER_SERVER_UPDATE_INTERVAL", "30s"),
        ("SENDER_SERVER_POLL_INTERVAL", "250ms"),
        ("SENDER_SERVER_SEND_THANKS_TIMEOUT", "2m"),
        ("SENDER_HTTP_TIMEOUT", "1h"),
    ]))
    .unwrap();

    assert_eq!(config.server.update_interval, Duration::from_secs(30));
    assert_eq!(config.server.poll_interval, Duration::from_millis(250));
    assert_eq!(config.server.send_thanks_timeout, Duration::from_secs(120));
    assert_eq!(config.http_timeout, Duration::from_secs(3600));
}

#[test]
fn test_compound_durations() {
    let config = load(&with_required(&[
        ("SENDER_SERVER_UPDATE_INTERVAL", "1m30s"),
        ("SENDER_SERVER_POLL_INTERVAL", "1.5s"),
    ]))
    .unwrap();

    assert_eq!(config.server.update_interval, Duration::from_secs(90));
    assert_eq!(config.server.poll_interval, Duration::from_millis(1500));
}

#[test]
fn test_invalid_duration() {
    let err = load(&with_required(&[("SENDER_SERVER_POLL_INTERVAL", "soon")])).unwrap_err();
    match err {
        ConfigError::Invalid { key, .. } => assert_eq!(key, "SENDER_SERVER_POLL_INTERVAL"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_zero_interval_rejected() {
    let err = load(&with_required(&[("SENDER_SERVER_UPDATE_INTERVAL", "0s")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
}

#[test]
fn test_api_url_needs_scheme() {
    let vars = [
        ("SENDER_EMAIL", "bot@example.com"),
        ("SENDER_PASSWORD", "hunter2"),
        ("SENDER_TAKERS_API", "api.example.com"),
    ];
    assert!(matches!(load(&vars), Err(ConfigError::Invalid { .. })));
}

#[test]
fn test_file_store() {
    let config = load(&with_required(&[
        ("SENDER_STORE", "file"),
        ("SENDER_STORE_DIR", "/var/lib/sender"),
    ]))
    .unwrap();

    assert_eq!(
        config.store,
        StoreBackendConfig::File {
            dir: PathBuf::from("/var/lib/sender")
        }
    );
}

#[test]
fn test_file_store_default_dir() {
    let config = load(&with_required(&[("SENDER_STORE", "file")])).unwrap();
    assert_eq!(
        config.store,
        StoreBackendConfig::File {
            dir: PathBuf::from("./data")
        }
    );
}

#[test]
fn test_redis_store_requires_addr() {
    let err = load(&with_required(&[("SENDER_STORE", "redis")])).unwrap_err();
    assert!(matches!(err, ConfigError::Missing(ref key) if key == "SENDER_REDIS_ADDR"));

    let config = load(&with_required(&[
        ("SENDER_STORE", "redis"),
        ("SENDER_REDIS_ADDR", "localhost:6379"),
    ]))
    .unwrap();
    assert_eq!(
        config.store,
        StoreBackendConfig::Redis {
            addr: "localhost:6379".into()
        }
    );
}

#[test]
fn test_unknown_store_backend() {
    let err = load(&with_required(&[("SENDER_STORE", "postgres")])).unwrap_err();
    assert!(err.to_string().contains("unknown backend"));
}
