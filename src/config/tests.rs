use super::settings::*;
use crate::extract::PatternError;
use crate::units::{BaseUnit, Prefix};

#[test]
fn test_parse_full_config() {
    let config = Config::from_toml_str(
        r#"
target = "n"
bins = 20

[patterns.static_power]
key = "static_power="

[patterns.delay]
key = "tpd="
unit = "s"
"#,
    )
    .unwrap();

    assert_eq!(config.target, BaseUnit::from(Prefix::Nano));
    assert_eq!(config.bins, 20);
    assert_eq!(config.patterns.len(), 2);

    let delay = &config.patterns["delay"];
    assert_eq!(delay.label, "delay");
    assert_eq!(delay.key, "tpd=");
    assert_eq!(delay.unit, "s");

    let power = &config.patterns["static_power"];
    assert_eq!(power.unit, "");
}

#[test]
fn test_defaults() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config.target, BaseUnit::from(Prefix::Pico));
    assert_eq!(config.bins, 15);
    assert!(config.patterns.is_empty());
}

#[test]
fn test_base_unit_target() {
    let config = Config::from_toml_str("target = \"\"").unwrap();
    assert_eq!(config.target, BaseUnit::NONE);
}

#[test]
fn test_invalid_target_rejected() {
    let result = Config::from_toml_str("target = \"x\"");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_resolve_defaults_to_static_power() {
    let settings = Config::empty().resolve(Overrides::default()).unwrap();
    let labels: Vec<&str> = settings.patterns.labels().collect();
    assert_eq!(labels, vec![DEFAULT_PARAMETER]);
    assert_eq!(settings.bins, 15);
}

#[test]
fn test_overrides_take_precedence() {
    let config = Config::from_toml_str(
        r#"
target = "n"
bins = 20

[patterns.current]
key = "i="
unit = "A"
"#,
    )
    .unwrap();

    let settings = config
        .resolve(Overrides {
            params: vec!["av_pow".to_string()],
            common: false,
            target: Some(BaseUnit::from(Prefix::Micro)),
            bins: Some(8),
        })
        .unwrap();

    assert_eq!(settings.target, BaseUnit::from(Prefix::Micro));
    assert_eq!(settings.bins, 8);
    let labels: Vec<&str> = settings.patterns.labels().collect();
    assert_eq!(labels, vec!["av_pow", "current"]);
}

#[test]
fn test_zero_bins_rejected() {
    let result = Config::empty().resolve(Overrides {
        bins: Some(0),
        ..Overrides::default()
    });
    assert!(matches!(result, Err(ConfigError::InvalidBins)));
}

#[test]
fn test_ambiguous_patterns_rejected() {
    let config = Config::from_toml_str(
        r#"
[patterns.a]
unit = "W"

[patterns.b]
unit = "W"
"#,
    )
    .unwrap();

    let result = config.resolve(Overrides::default());
    assert!(matches!(
        result,
        Err(ConfigError::Pattern(PatternError::Ambiguous(_, _)))
    ));
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("simhist-config-{}.toml", std::process::id()));
    std::fs::write(&path, "target = \"m\"\n[patterns.av_pow]\nkey = \"av_pow=\"\n").unwrap();

    let config = Config::load_from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.target, BaseUnit::from(Prefix::Milli));
    assert!(config.patterns.contains_key("av_pow"));
}

#[test]
fn test_missing_file_names_path() {
    let err = Config::load_from_file("/nonexistent/simhist.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/simhist.toml"));
}

#[test]
fn test_common_parameters_added() {
    let config = Config::from_toml_str(
        r#"
[patterns.current]
key = "i_total="
"#,
    )
    .unwrap();

    let settings = config
        .resolve(Overrides {
            common: true,
            ..Overrides::default()
        })
        .unwrap();

    let labels: Vec<&str> = settings.patterns.labels().collect();
    assert_eq!(
        labels,
        vec!["av_pow", "current", "static_power", "total_tp", "voltage"]
    );
    // the configured pattern wins over the built-in one with the same label
    let current = settings.patterns.iter().find(|s| s.label == "current").unwrap();
    assert_eq!(current.key, "i_total=");
}
