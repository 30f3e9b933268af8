use super::*;
use lucid_protocols::ExplanationMode;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 5000);
    assert_eq!(config.relay.provider, ProviderKind::OpenAI);
    assert!(config.relay.api_key.is_none());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_pipeline_config_default() {
    let pipeline = PipelineConfig::default();
    assert_eq!(pipeline.debounce_ms, 300);
    assert_eq!(pipeline.max_chars, 1000);
    assert_eq!(pipeline.request_timeout_secs, 15);
    assert_eq!(pipeline.relay_url, "http://localhost:5000");
    assert_eq!(pipeline.mode, ExplanationMode::Simple);
    assert_eq!(pipeline.classifier_depth, 1);
    assert_eq!(pipeline.history_limit, 100);
    assert_eq!(pipeline.click_grace_ms, 10);
}

#[test]
fn test_panel_config_default() {
    let panel = PanelConfig::default();
    assert_eq!(panel.width, 320.0);
    assert_eq!(panel.height, 200.0);
    assert_eq!(panel.gap, 10.0);
    assert_eq!(panel.margin, 10.0);
    assert_eq!(panel.anchoring, AnchoringMode::Document);
}

#[test]
fn test_terminal_config_default() {
    let terminal = TerminalConfig::default();
    assert_eq!(terminal.default_width, 400.0);
    assert_eq!(terminal.min_width, 300.0);
    assert_eq!(terminal.max_width, 800.0);
}

#[test]
fn test_openai_profile() {
    let profile = RelayConfig::default().profile();
    assert_eq!(profile.model, "gpt-3.5-turbo");
    assert_eq!(profile.concise_max_tokens, 100);
    assert_eq!(profile.question_max_tokens, 500);
    assert_eq!(profile.analysis_max_tokens, 150);
    assert_eq!(profile.improvements_max_tokens, 250);
    assert!(profile.top_p.is_none());
}

#[test]
fn test_gemini_profile() {
    let relay = RelayConfig {
        provider: ProviderKind::Gemini,
        ..Default::default()
    };
    let profile = relay.profile();
    assert_eq!(profile.model, "gemini-1.5-flash");
    assert_eq!(profile.concise_max_tokens, 75);
    assert_eq!(profile.top_p, Some(1.0));
}

#[test]
fn test_profile_overrides_only_touch_set_fields() {
    let overrides = ProfileOverrides {
        model: Some("gpt-4o-mini".to_string()),
        question_max_tokens: Some(800),
        ..Default::default()
    };
    let profile = ProviderProfile::openai().merged(&overrides);
    assert_eq!(profile.model, "gpt-4o-mini");
    assert_eq!(profile.question_max_tokens, 800);
    assert_eq!(profile.concise_max_tokens, 100);
    assert!((profile.temperature - 0.3).abs() < f32::EPSILON);
}

#[test]
fn test_profile_uses_selected_provider_overrides() {
    let relay = RelayConfig {
        provider: ProviderKind::Gemini,
        openai: ProfileOverrides {
            model: Some("ignored".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    assert_eq!(relay.profile().model, "gemini-1.5-flash");
}

#[test]
fn test_provider_kind_serialization() {
    assert_eq!(serde_json::to_string(&ProviderKind::OpenAI).unwrap(), "\"openai\"");
    assert_eq!(serde_json::to_string(&ProviderKind::Gemini).unwrap(), "\"gemini\"");
    assert_eq!(ProviderKind::Gemini.as_str(), "gemini");
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("127.0.0.1"));
    assert!(json.contains("5000"));
}

#[test]
fn test_logging_config_from_toml() {
    let config: Config = toml::from_str(
        r#"
        [logging]
        level = "debug"
        dir = "/tmp/lucid-logs"
        json = true
        "#,
    )
    .unwrap();
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.dir, Some(PathBuf::from("/tmp/lucid-logs")));
    assert!(config.logging.json);
    assert_eq!(config.logging.max_files, 30);
}
