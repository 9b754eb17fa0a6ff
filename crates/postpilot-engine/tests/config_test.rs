use postpilot_engine::config::{ConfigError, ConfigLoader};

#[tokio::test]
async fn loads_overrides_and_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("postpilot.yaml");
    tokio::fs::write(
        &path,
        r#"
classifier:
  confidence_threshold: 0.8
navigator:
  stuck_streak: 6
"#,
    )
    .await
    .unwrap();

    let config = ConfigLoader::load_from(&path).await.unwrap();
    assert_eq!(config.classifier.confidence_threshold, 0.8);
    assert_eq!(config.navigator.stuck_streak, 6);

    // Untouched sections keep their defaults.
    assert_eq!(config.navigator.recovery_wait_seconds, 3.0);
    assert!(!config.policy.optimistic_focus_typing);
    assert_eq!(config.policy.fuzzy_min_score, 0.85);
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConfigLoader::load_from(&dir.path().join("absent.yaml"))
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[tokio::test]
async fn malformed_yaml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("postpilot.yaml");
    tokio::fs::write(&path, "classifier: [not, a, mapping]")
        .await
        .unwrap();

    let err = ConfigLoader::load_from(&path).await.unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
