use std::path::Path;

use stepsight_cli::config::{
    CONFIG_VERSION, StepsightConfig, delete_config, load_config, normalize_api_url,
    resolve_api_url, save_config,
};

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, StepsightConfig::default());
    assert_eq!(config.api_base_url, "http://127.0.0.1:5001");
    assert_eq!(config.config_version, CONFIG_VERSION);
}

#[test]
fn omitted_keys_take_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"report_dir": "/tmp/reports"}"#).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.config_version, CONFIG_VERSION);
    assert_eq!(config.api_base_url, "http://127.0.0.1:5001");
    assert_eq!(config.report_dir.as_deref(), Some(Path::new("/tmp/reports")));
}

#[test]
fn unparseable_file_names_the_file_and_the_way_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let message = load_config(&path).unwrap_err().to_string();
    assert!(message.contains("config.json"));
    assert!(message.contains("stepsight config reset"));
}

#[test]
fn newer_config_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"config_version": 9, "api_base_url": "http://x"}"#).unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("config_version 9"));
}

#[test]
fn save_then_load_keeps_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let config = StepsightConfig {
        api_base_url: "https://mri.example.org".to_string(),
        report_dir: Some(dir.path().join("reports")),
        ..StepsightConfig::default()
    };

    save_config(&path, &config).unwrap();
    assert_eq!(load_config(&path).unwrap(), config);

    let entries = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
    assert_eq!(entries, 1, "no staging file left behind");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[test]
fn delete_reports_whether_a_file_was_removed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "garbage").unwrap();

    assert!(delete_config(&path).unwrap());
    assert!(!path.exists());
    assert!(!delete_config(&path).unwrap());
}

#[test]
fn environment_override_wins_when_set() {
    let config = StepsightConfig::default();
    assert_eq!(resolve_api_url(&config, None), "http://127.0.0.1:5001");
    assert_eq!(resolve_api_url(&config, Some("  ")), "http://127.0.0.1:5001");
    assert_eq!(
        resolve_api_url(&config, Some("http://10.0.0.5:5001")),
        "http://10.0.0.5:5001"
    );
}

#[test]
fn api_url_must_be_http() {
    assert_eq!(
        normalize_api_url(" https://mri.example.org/ ").unwrap(),
        "https://mri.example.org"
    );
    assert!(normalize_api_url("mri.example.org").is_err());
    assert!(normalize_api_url("http://").is_err());
}
