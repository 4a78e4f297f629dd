use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::config::Config;
use crate::llm::TextGenerator;
use crate::memory::Memory;
use crate::store::{MemorySessionStore, SessionStore};
use crate::workflow::WorkflowRegistry;

/// Memory作用域
pub struct MemoryScope;

impl MemoryScope {
    pub const RESEARCH: &'static str = "research";
}

/// Memory键
pub struct ScopedKeys;

impl ScopedKeys {
    pub const QUESTIONS: &'static str = "questions";
    pub const PERSONAS: &'static str = "personas";
    pub const INTERVIEWS: &'static str = "interviews";
    pub const SYNTHESIS: &'static str = "synthesis";
}

/// 研究上下文 - 流水线各阶段共享的资源句柄
#[derive(Clone)]
pub struct ResearchContext {
    /// 文本生成器，用于与AI通信
    pub text_generator: Arc<TextGenerator>,
    /// 配置
    pub config: Config,
    /// 阶段间数据交换的内存
    pub memory: Arc<RwLock<Memory>>,
    /// 活跃工作流注册表，供进度轮询方并发读取
    pub registry: Arc<WorkflowRegistry>,
    /// 会话持久化
    pub store: Arc<dyn SessionStore>,
}

impl ResearchContext {
    /// 创建新的研究上下文，默认使用进程内存存储
    pub fn new(config: Config) -> Self {
        let store = Arc::new(MemorySessionStore::new());
        Self::with_store(config, store)
    }

    /// 使用自定义会话存储创建研究上下文
    pub fn with_store(config: Config, store: Arc<dyn SessionStore>) -> Self {
        let text_generator = Arc::new(TextGenerator::new(config.clone()));
        let registry = Arc::new(WorkflowRegistry::new(&config.registry));
        let memory = Arc::new(RwLock::new(Memory::new()));

        Self {
            text_generator,
            config,
            memory,
            registry,
            store,
        }
    }

    /// 存储数据到 Memory
    pub async fn store_to_memory<T>(&self, scope: &str, key: &str, data: T) -> Result<()>
    where
        T: Serialize + Send + Sync,
    {
        let mut memory = self.memory.write().await;
        memory.store(scope, key, data)
    }

    /// 从 Memory 获取数据
    pub async fn get_from_memory<T>(&self, scope: &str, key: &str) -> Option<T>
    where
        T: for<'a> Deserialize<'a> + Send + Sync,
    {
        let memory = self.memory.read().await;
        memory.get(scope, key)
    }

    /// 检查Memory中是否存在指定数据
    pub async fn has_memory_data(&self, scope: &str, key: &str) -> bool {
        let memory = self.memory.read().await;
        memory.has_data(scope, key)
    }
}
