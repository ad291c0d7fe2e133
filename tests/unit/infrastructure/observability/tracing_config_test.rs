use tolk::infrastructure::observability::TracingConfig;

#[test]
fn given_default_config_when_created_then_environment_is_set() {
    let config = TracingConfig::default();

    assert!(!config.environment.is_empty());
    assert!(config.default_filter.contains("tolk=debug"));
}

#[test]
fn given_level_when_building_config_then_filter_starts_with_level() {
    let config = TracingConfig::new("Test", true, "warn");

    assert!(config.json_format);
    assert_eq!(config.environment, "Test");
    assert_eq!(config.default_filter, "warn,tolk=debug,tower_http=debug");
}
