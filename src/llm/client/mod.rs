//! 文本生成器 - 提供统一的文本生成接口
//!
//! 这是流水线与模型后端之间唯一的边界：后端不可用、调用失败、超时或返回
//! 空白时，一律落到按意图标签分发的确定性模板，本模块永远不向调用方抛错。

use std::future::Future;
use std::time::Duration;

use anyhow::{Result, anyhow};

use crate::cache::CacheManager;
use crate::config::Config;
use crate::llm::{GenerationIntent, fallback};

mod providers;

use providers::ProviderClient;

/// 通用系统提示词
const SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Provide direct, clear responses without showing your thinking process.";

/// 文本生成器
pub struct TextGenerator {
    config: Config,
    client: Option<ProviderClient>,
    cache: CacheManager,
}

impl TextGenerator {
    /// 创建新的文本生成器。未配置API KEY时进入确定性模板模式
    pub fn new(config: Config) -> Self {
        let client = if config.has_model_backend() {
            match ProviderClient::new(&config.llm) {
                Ok(client) => Some(client),
                Err(e) => {
                    eprintln!("⚠️ 初始化模型客户端失败，进入模板模式: {}", e);
                    None
                }
            }
        } else {
            println!("ℹ️ 未配置模型API KEY，使用确定性模板模式");
            None
        };

        let cache = CacheManager::new(config.cache.clone());

        Self {
            config,
            client,
            cache,
        }
    }

    /// 是否存在可用的模型后端
    pub fn has_backend(&self) -> bool {
        self.client.is_some()
    }

    /// 生成文本。永不失败：任何后端问题都以意图对应的模板响应兜底
    pub async fn generate(&self, intent: GenerationIntent, prompt: &str) -> String {
        if let Some(client) = &self.client {
            // 先查缓存
            if let Ok(Some(cached)) = self.cache.get::<String>(intent.category(), prompt).await {
                return cached;
            }

            match self.call_backend(client, prompt).await {
                Ok(text) if !text.trim().is_empty() => {
                    let text = text.trim().to_string();
                    if let Err(e) = self.cache.set(intent.category(), prompt, &text).await {
                        eprintln!("⚠️ 写入缓存失败({}): {}", intent, e);
                    }
                    return text;
                }
                Ok(_) => {
                    eprintln!("⚠️ 模型返回空响应({})，使用模板回退", intent);
                }
                Err(e) => {
                    eprintln!("⚠️ 调用模型服务失败({})，使用模板回退: {}", intent, e);
                }
            }
        }

        fallback::respond(intent, prompt)
    }

    /// 调用模型后端，带超时与重试
    async fn call_backend(&self, client: &ProviderClient, prompt: &str) -> Result<String> {
        let agent = client.create_agent(&self.config.llm.model, SYSTEM_PROMPT, &self.config.llm);
        let timeout = Duration::from_secs(self.config.llm.timeout_seconds);

        self.retry_with_backoff(|| async {
            match tokio::time::timeout(timeout, agent.prompt(prompt)).await {
                Ok(result) => result,
                Err(_) => Err(anyhow!(
                    "model call timed out after {}s",
                    self.config.llm.timeout_seconds
                )),
            }
        })
        .await
    }

    /// 通用重试逻辑，用于处理异步操作的重试机制
    async fn retry_with_backoff<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, anyhow::Error>>,
    {
        let llm_config = &self.config.llm;
        let max_retries = llm_config.retry_attempts.max(1);
        let retry_delay_ms = llm_config.retry_delay_ms;
        let mut retries = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    retries += 1;
                    eprintln!(
                        "❌ 调用模型服务出错，重试中 (第 {} / {}次尝试): {}",
                        retries, max_retries, err
                    );
                    if retries >= max_retries {
                        return Err(err);
                    }
                    tokio::time::sleep(Duration::from_millis(retry_delay_ms)).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::fallback::GENERIC_FALLBACK;
    use tempfile::TempDir;

    fn mock_generator() -> (TextGenerator, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.llm.api_key = String::new();
        config.cache.cache_dir = temp_dir.path().join("cache");
        (TextGenerator::new(config), temp_dir)
    }

    #[tokio::test]
    async fn test_mock_mode_never_fails() {
        let (generator, _guard) = mock_generator();
        assert!(!generator.has_backend());

        let text = generator
            .generate(GenerationIntent::General, "anything at all")
            .await;
        assert_eq!(text, GENERIC_FALLBACK);
    }

    #[tokio::test]
    async fn test_mock_mode_is_repeatable() {
        let (generator, _guard) = mock_generator();
        let prompt = "Generate exactly 3 interview questions about: code review practices";

        let first = generator.generate(GenerationIntent::Questions, prompt).await;
        let second = generator.generate(GenerationIntent::Questions, prompt).await;
        assert_eq!(first, second);
        assert!(!first.trim().is_empty());
    }

    #[tokio::test]
    async fn test_intent_routes_to_matching_template() {
        let (generator, _guard) = mock_generator();

        let personas = generator
            .generate(
                GenerationIntent::Personas,
                "Generate exactly 2 unique personas. Each persona should belong to the target demographic: software engineers",
            )
            .await;
        assert!(personas.trim_start().starts_with('{'));
        assert!(personas.contains("personas"));

        let synthesis = generator
            .generate(
                GenerationIntent::Synthesis,
                "Analyze these interviews.\nResearch Question: testing\nTarget Demographic: QA engineers",
            )
            .await;
        assert!(synthesis.contains("ACTIONABLE RECOMMENDATIONS"));
    }
}
