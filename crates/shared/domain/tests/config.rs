use panelkit_domain::config::{LoggerConfig, PanelkitConfig, PanelsConfig, PolicyConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let panels = PanelsConfig::default();
    assert!(panels.is_disabled("developer"));
    assert!(!panels.is_disabled("display"));

    assert!(PolicyConfig::default().administrators_can_edit);

    let logger = LoggerConfig::default();
    assert_eq!(logger.level, "info");
    assert!(!logger.json);
    assert!(logger.path.is_none());
}

#[test]
fn panelkit_config_deserializes() {
    let raw = json!({
        "panels": { "disabled": ["language"] },
        "policy": { "administrators_can_edit": false },
        "logger": { "level": "debug", "json": true, "path": "/tmp/logs" }
    });

    let cfg: PanelkitConfig = serde_json::from_value(raw).expect("config deserialize");
    assert!(cfg.panels.is_disabled("language"));
    assert!(!cfg.panels.is_disabled("developer"));
    assert!(!cfg.policy.administrators_can_edit);
    assert_eq!(cfg.logger.path, Some(std::path::PathBuf::from("/tmp/logs")));
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let cfg: PanelkitConfig = serde_json::from_value(json!({})).expect("config deserialize");
    assert!(cfg.policy.administrators_can_edit);
    assert_eq!(cfg.logger.level, "info");
}
