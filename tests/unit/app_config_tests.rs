/*!
 * Tests for application configuration
 */

use doctran::app_config::Config;

#[test]
fn test_default_config_withNoOverrides_shouldUseChineseTarget() {
    let config = Config::default();
    assert_eq!(config.target_language, "中文");
    assert_eq!(config.translation.model, "deepseek-ai/DeepSeek-V3");
    assert_eq!(config.translation.max_tokens, 1000);
    assert!((config.translation.temperature - 0.3).abs() < f32::EPSILON);
}

#[test]
fn test_validate_withMissingApiKey_shouldFail() {
    let config = Config::default();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withApiKey_shouldSucceed() {
    let mut config = Config::default();
    config.translation.api_key = "key".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withUnknownTargetLanguage_shouldFail() {
    let mut config = Config::default();
    config.translation.api_key = "key".to_string();
    config.target_language = "Klingon".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withInvalidEndpoint_shouldFail() {
    let mut config = Config::default();
    config.translation.api_key = "key".to_string();
    config.translation.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_serde_withRoundTrip_shouldPreserveFields() {
    let mut config = Config::default();
    config.translation.api_key = "secret".to_string();
    config.layout_engine.enabled = true;

    let json = serde_json::to_string(&config).expect("serialize");
    let reloaded: Config = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(reloaded.target_language, config.target_language);
    assert_eq!(reloaded.translation.api_key, "secret");
    assert!(reloaded.layout_engine.enabled);
}

#[test]
fn test_config_deserialize_withEmptyObject_shouldApplyAllDefaults() {
    let config: Config = serde_json::from_str("{}").expect("deserialize empty object");
    assert_eq!(config.target_language, "中文");
    assert!(!config.layout_engine.enabled);
    assert_eq!(config.layout_engine.command, "pdf2zh");
    assert!(config.fonts.download_url.contains("source-han-sans"));
}

#[test]
fn test_system_prompt_default_shouldForbidCommentary() {
    let config = Config::default();
    let prompt = config.translation.system_prompt;
    assert!(prompt.contains("{target_language}"));
    assert!(prompt.contains("Do not add"));
}
