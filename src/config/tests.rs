#[cfg(test)]
mod tests {
    use crate::config::{Config, LLMProvider};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.llm.api_base_url, "https://api.cerebras.ai/v1");
        assert_eq!(config.llm.model, "llama3.3-70b");
        assert_eq!(config.llm.max_tokens, 800);
        assert_eq!(config.llm.temperature, 0.7);
        assert_eq!(config.llm.retry_attempts, 3);
        assert_eq!(config.llm.timeout_seconds, 30);

        assert_eq!(config.research.default_num_interviews, 10);
        assert_eq!(config.research.default_num_questions, 5);

        assert_eq!(config.registry.capacity, 64);
        assert_eq!(config.registry.expire_minutes, 60);

        assert!(config.cache.enabled);
        assert_eq!(config.cache.cache_dir, PathBuf::from(".userlens/cache"));
        assert_eq!(config.cache.expire_hours, 168);

        assert!(!config.verbose);
    }

    #[test]
    fn test_provider_roundtrip() {
        let providers = [
            "openai",
            "moonshot",
            "deepseek",
            "mistral",
            "openrouter",
            "anthropic",
            "gemini",
            "ollama",
        ];

        for name in providers {
            let provider: LLMProvider = name.parse().unwrap();
            assert_eq!(provider.to_string(), name);
        }

        assert!("cerebras-unknown".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn test_provider_parse_case_insensitive() {
        assert_eq!(
            "OpenAI".parse::<LLMProvider>().unwrap(),
            LLMProvider::OpenAI
        );
        assert_eq!(
            "ANTHROPIC".parse::<LLMProvider>().unwrap(),
            LLMProvider::Anthropic
        );
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("userlens.toml");

        let content = r#"
verbose = true

[llm]
provider = "anthropic"
api_key = "test-key"
model = "claude-sonnet"
temperature = 0.2

[research]
default_num_interviews = 3
default_num_questions = 4

[registry]
capacity = 8
expire_minutes = 5

[cache]
enabled = false
"#;
        fs::write(&config_path, content).unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert!(config.verbose);
        assert_eq!(config.llm.provider, LLMProvider::Anthropic);
        assert_eq!(config.llm.api_key, "test-key");
        assert_eq!(config.llm.model, "claude-sonnet");
        assert_eq!(config.llm.temperature, 0.2);
        // 未覆盖的字段落回默认值
        assert_eq!(config.llm.max_tokens, 800);
        assert_eq!(config.research.default_num_interviews, 3);
        assert_eq!(config.research.default_num_questions, 4);
        assert_eq!(config.registry.capacity, 8);
        assert_eq!(config.registry.expire_minutes, 5);
        assert!(!config.cache.enabled);
    }

    #[test]
    fn test_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        assert!(Config::from_file(&config_path).is_err());
    }

    #[test]
    fn test_from_file_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("userlens.toml");
        fs::write(&config_path, "this is not [valid toml").unwrap();

        assert!(Config::from_file(&config_path).is_err());
    }

    #[test]
    fn test_has_model_backend() {
        let mut config = Config::default();
        config.llm.api_key = String::new();
        assert!(!config.has_model_backend());

        config.llm.api_key = "   ".to_string();
        assert!(!config.has_model_backend());

        config.llm.api_key = "sk-test".to_string();
        assert!(config.has_model_backend());
    }
}
