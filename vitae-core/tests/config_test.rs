use vitae_core::config::*;
use vitae_core::errors::{ConfigError, VitaeError};

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = VitaeConfig::from_toml("").unwrap();

    // Storage defaults
    assert_eq!(config.storage.db_path, "vitae.db");
    assert_eq!(config.storage.busy_timeout_ms, 5_000);
    assert_eq!(config.storage.read_pool_size, 4);

    // Embedding defaults
    assert_eq!(config.embedding.provider, "tfidf");
    assert_eq!(config.embedding.dimensions, 256);
    assert_eq!(config.embedding.max_samples_per_skill, 5);

    // Selection defaults
    assert_eq!(config.selection.default_top_n, 5);
    assert_eq!(config.selection.timeout_ms, 2_000);
    assert_eq!(config.selection.tag_weight, 1.0);
    assert_eq!(config.selection.requirement_token_weight, 0.5);
    assert_eq!(config.selection.similarity_weight, 1.0);

    // Boost defaults
    assert_eq!(config.boost.conflict_strategy, ConflictStrategy::MaxBoost);

    // Learning defaults
    assert_eq!(config.learning.soft_penalty_multiplier, 0.8);
    assert_eq!(config.learning.full_penalty_multiplier, 0.3);
    assert_eq!(config.learning.correct_prediction_boost, 0.05);
    assert_eq!(config.learning.wrong_prediction_decay, 0.7);
    assert_eq!(config.learning.min_observations_for_stability, 3);
    assert_eq!(config.learning.ownership_confidence_threshold, 0.6);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[boost]
conflict_strategy = "last_write"

[learning]
soft_penalty_multiplier = 0.5
min_observations_for_stability = 5
"#;
    let config = VitaeConfig::from_toml(toml).unwrap();
    assert_eq!(config.boost.conflict_strategy, ConflictStrategy::LastWrite);
    assert_eq!(config.learning.soft_penalty_multiplier, 0.5);
    assert_eq!(config.learning.min_observations_for_stability, 5);
    // Non-overridden fields keep defaults
    assert_eq!(config.learning.full_penalty_multiplier, 0.3);
}

#[test]
fn unknown_conflict_strategy_fails_at_load() {
    let err = VitaeConfig::from_toml("[boost]\nconflict_strategy = \"coin_flip\"\n").unwrap_err();
    assert!(matches!(
        err,
        VitaeError::ConfigError(ConfigError::ParseFailed { .. })
    ));
}

#[test]
fn out_of_range_multiplier_fails_at_load() {
    let err = VitaeConfig::from_toml("[learning]\nfull_penalty_multiplier = 1.5\n").unwrap_err();
    match err {
        VitaeError::ConfigError(ConfigError::OutOfRange { field, .. }) => {
            assert_eq!(field, "learning.full_penalty_multiplier");
        }
        other => panic!("expected OutOfRange, got {other:?}"),
    }
}

#[test]
fn inverted_confidence_bounds_fail_at_load() {
    let toml = "[learning]\nmin_confidence = 0.9\nmax_confidence = 0.5\n";
    assert!(VitaeConfig::from_toml(toml).is_err());
}

#[test]
fn negative_weight_fails_at_load() {
    assert!(VitaeConfig::from_toml("[selection]\ntag_weight = -1.0\n").is_err());
}

#[test]
fn config_reads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vitae.toml");
    std::fs::write(&path, "[selection]\ndefault_top_n = 9\n").unwrap();
    let config = VitaeConfig::from_file(&path).unwrap();
    assert_eq!(config.selection.default_top_n, 9);
}

#[test]
fn missing_file_is_a_read_error() {
    let err = VitaeConfig::from_file(std::path::Path::new("/nonexistent/vitae.toml")).unwrap_err();
    assert!(matches!(
        err,
        VitaeError::ConfigError(ConfigError::ReadFailed { .. })
    ));
}

#[test]
fn config_serde_roundtrip() {
    let config = VitaeConfig::default();
    let toml_str = toml::to_string(&config).unwrap();
    let roundtripped = VitaeConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.learning, config.learning);
    assert_eq!(
        roundtripped.embedding.dimensions,
        config.embedding.dimensions
    );
}
