mod common;
use common::temp_path;
use rgapwatch::AppError;
use rgapwatch::config::{Config, TagMatch};

#[test]
fn test_default_config() {
    let cfg = Config::default();

    assert_eq!(cfg.sampling_rate, "1D");
    assert_eq!(cfg.failure_sentinel, -100.0);
    assert_eq!(cfg.tag_match, TagMatch::Strict);
    assert!(cfg.render_chart);
    assert!(cfg.database.ends_with("historian.sqlite"));
    assert!(Config::config_file().ends_with("rgapwatch/rgapwatch.conf"));
}

#[test]
fn test_save_and_load_roundtrip() {
    let path = temp_path("config_roundtrip", "conf");
    let cfg = Config {
        database: "/srv/historian/plant.sqlite".to_string(),
        chart_dir: "~/charts".to_string(),
        sampling_rate: "12h".to_string(),
        failure_sentinel: -1.0,
        tag_match: TagMatch::First,
        render_chart: false,
    };

    cfg.save_to(&path).expect("save config");
    let loaded = Config::load_from(&path).expect("load config");

    assert_eq!(loaded, cfg);
    let yaml = std::fs::read_to_string(&path).expect("read yaml");
    assert!(yaml.contains("tag_match: first"));
}

#[test]
fn test_partial_file_uses_defaults() {
    let path = temp_path("config_partial", "conf");
    std::fs::write(&path, "sampling_rate: 30min\n").expect("write yaml");

    let cfg = Config::load_from(&path).expect("load config");

    assert_eq!(cfg.sampling_rate, "30min");
    assert_eq!(cfg.failure_sentinel, -100.0);
    assert_eq!(cfg.tag_match, TagMatch::Strict);
    assert!(cfg.render_chart);
}

#[test]
fn test_invalid_sampling_rate_is_rejected() {
    let path = temp_path("config_bad_rate", "conf");
    std::fs::write(&path, "sampling_rate: often\n").expect("write yaml");

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, AppError::InvalidSamplingRate(_)));
}

#[test]
fn test_invalid_yaml_is_rejected() {
    let path = temp_path("config_bad_yaml", "conf");
    std::fs::write(&path, "tag_match: sometimes\n").expect("write yaml");

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, AppError::Yaml(_)));
}

#[test]
fn test_missing_file_is_a_config_error() {
    let path = temp_path("config_missing", "conf");

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn test_tilde_paths_are_expanded() {
    let cfg = Config {
        chart_dir: "~/charts".to_string(),
        ..Config::default()
    };

    if let Some(home) = dirs::home_dir() {
        assert_eq!(cfg.chart_path(), home.join("charts"));
    }
}
