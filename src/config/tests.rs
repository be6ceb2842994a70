use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_bandscore_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("BANDSCORE_PORT");
        env::remove_var("BANDSCORE_BIND_ADDR");
        env::remove_var("BANDSCORE_QDRANT_URL");
        env::remove_var("BANDSCORE_CHAT_MODEL");
        env::remove_var("BANDSCORE_EMBED_URL");
        env::remove_var("BANDSCORE_EMBED_MODEL");
        env::remove_var("BANDSCORE_EMBED_API_KEY");
        env::remove_var("BANDSCORE_DATASET_PATH");
        env::remove_var("BANDSCORE_STORE_PATH");
        env::remove_var("BANDSCORE_TOP_K");
        env::remove_var("BANDSCORE_SIMILARITY_THRESHOLD");
        env::remove_var("BANDSCORE_INGEST_BATCH_SIZE");
        env::remove_var("BANDSCORE_INGEST_DELAY_MS");
        env::remove_var("BANDSCORE_MOCK_PROVIDER");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.qdrant_url, "http://localhost:6334");
    assert_eq!(config.chat_model, "mistral-small-latest");
    assert_eq!(config.embed_model, "mistral-embed");
    assert!(config.embed_api_key.is_none());
    assert!(config.dataset_path.is_none());
    assert_eq!(config.store_path, PathBuf::from("./.data"));
    assert_eq!(config.top_k, 5);
    assert_eq!(config.similarity_threshold, 0.7);
    assert_eq!(config.ingest_batch_size, 2);
    assert_eq!(config.ingest_delay_ms, 3000);
    assert!(!config.mock_provider);
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_bandscore_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8080);
    assert_eq!(config.top_k, 5);
    assert!(!config.mock_provider);
}

#[test]
#[serial]
fn test_from_env_custom_port() {
    clear_bandscore_env();

    with_env_vars(&[("BANDSCORE_PORT", "3000")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.port, 3000);
    });
}

#[test]
#[serial]
fn test_from_env_invalid_port() {
    clear_bandscore_env();

    with_env_vars(&[("BANDSCORE_PORT", "not-a-port")], || {
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::PortParseError { .. })
        ));
    });

    with_env_vars(&[("BANDSCORE_PORT", "0")], || {
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidPort { .. })
        ));
    });
}

#[test]
#[serial]
fn test_from_env_retrieval_overrides() {
    clear_bandscore_env();

    with_env_vars(
        &[
            ("BANDSCORE_TOP_K", "3"),
            ("BANDSCORE_SIMILARITY_THRESHOLD", "0.55"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.top_k, 3);
            assert_eq!(config.similarity_threshold, 0.55);
        },
    );
}

#[test]
#[serial]
fn test_from_env_blank_api_key_means_stub() {
    clear_bandscore_env();

    with_env_vars(&[("BANDSCORE_EMBED_API_KEY", "   ")], || {
        let config = Config::from_env().expect("should parse");
        assert!(config.embed_api_key.is_none());
    });

    with_env_vars(&[("BANDSCORE_EMBED_API_KEY", "sk-123")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.embed_api_key.as_deref(), Some("sk-123"));
    });
}

#[test]
#[serial]
fn test_from_env_mock_provider_flag() {
    clear_bandscore_env();

    with_env_vars(&[("BANDSCORE_MOCK_PROVIDER", "1")], || {
        let config = Config::from_env().expect("should parse");
        assert!(config.mock_provider);
    });
}

#[test]
fn test_validate_rejects_bad_threshold() {
    let config = Config {
        similarity_threshold: 1.5,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidThreshold { .. })
    ));
}

#[test]
fn test_validate_rejects_zero_top_k_and_batch() {
    let config = Config {
        top_k: 0,
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidTopK)));

    let config = Config {
        ingest_batch_size: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidBatchSize)
    ));
}

#[test]
fn test_validate_rejects_missing_dataset() {
    let config = Config {
        dataset_path: Some(PathBuf::from("/definitely/not/here.csv")),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_accepts_defaults() {
    Config::default().validate().expect("defaults are valid");
}
