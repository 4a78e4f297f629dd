use crate::config::{Config, LLMProvider};
use crate::types::ResearchRequest;
use clap::Parser;
use std::path::PathBuf;

/// UserLens-RS - 由Rust与AI驱动的合成用户研究引擎
#[derive(Parser, Debug)]
#[command(name = "userlens-rs")]
#[command(
    about = "AI-powered synthetic user research engine. It generates interview questions, synthesizes personas, simulates in-depth interviews via LLMs, and produces an aggregated synthesis report."
)]
#[command(author = "Sopaco")]
#[command(version)]
pub struct Args {
    /// 研究问题
    #[arg(short = 'q', long)]
    pub research_question: String,

    /// 目标人群
    #[arg(short = 'd', long)]
    pub target_demographic: String,

    /// 访谈人数（即画像数量）
    #[arg(long)]
    pub num_interviews: Option<usize>,

    /// 每场访谈的问题数量
    #[arg(long)]
    pub num_questions: Option<usize>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// LLM Provider (openai, mistral, openrouter, anthropic, deepseek)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 推理模型
    #[arg(long)]
    pub model: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 是否禁用缓存
    #[arg(long)]
    pub no_cache: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置与研究请求
    pub fn into_parts(self) -> (Config, ResearchRequest) {
        let mut config = if let Some(config_path) = &self.config {
            // 如果显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path).unwrap_or_else(|_| {
                panic!("⚠️ 警告: 无法读取配置文件 {:?}", config_path)
            })
        } else {
            // 如果没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("userlens.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|_| {
                    panic!(
                        "⚠️ 警告: 无法读取默认配置文件 {:?}",
                        default_config_path
                    )
                })
            } else {
                // 默认配置文件不存在，使用默认值
                Config::default()
            }
        };

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }

        // 缓存配置
        if self.no_cache {
            config.cache.enabled = false;
        }

        config.verbose = self.verbose;

        let request = ResearchRequest::new(
            self.research_question,
            self.target_demographic,
            self.num_interviews
                .unwrap_or(config.research.default_num_interviews),
            self.num_questions
                .unwrap_or(config.research.default_num_questions),
        );

        (config, request)
    }
}
