use super::model::{ReportConfig, Settings};

#[test]
fn report_config_defaults() {
    let cfg = ReportConfig::default();
    assert_eq!(cfg.page_size, 10);
    assert_eq!(cfg.data_source_id, "sales-demo");
    assert!(cfg.state_file.ends_with(".json"));
}

#[test]
fn settings_deserialize_with_missing_sections() {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::from_str(
            "[report]\npage_size = 25\n",
            config::FileFormat::Toml,
        ))
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();

    assert_eq!(settings.report.page_size, 25);
    assert_eq!(settings.report.data_source_id, "sales-demo");
    assert_eq!(settings.logging.stdout_level, "info");
    assert!(settings.time.is_none());
}

#[test]
fn global_config_reads_repository_file() {
    let cfg = &crate::shared::config::CONFIG;
    assert_eq!(cfg.report.page_size, 10);
    assert_eq!(
        cfg.time.as_ref().and_then(|t| t.timezone.clone()),
        Some("UTC".to_string())
    );
}
