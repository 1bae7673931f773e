use kitchen_critic::{ChatCompletionClient, CommentaryModel, GeneratorConfig};

#[test]
fn default_config_matches_the_service_constants() {
    let config = GeneratorConfig::default();
    assert_eq!(config.api_base, "https://api.deepseek.com/v1/chat/completions");
    assert_eq!(config.model, "deepseek-chat");
    assert_eq!(config.max_tokens, 500);
    assert_eq!(config.timeout_seconds, 60);
}

#[test]
fn with_config_applies_the_replacement_config() {
    let custom = GeneratorConfig {
        model: "deepseek-reasoner".to_string(),
        timeout_seconds: 5,
        ..GeneratorConfig::default()
    };

    let client =
        ChatCompletionClient::new("test-key", GeneratorConfig::default()).with_config(custom);
    assert_eq!(client.model_name(), "deepseek-reasoner");
}
