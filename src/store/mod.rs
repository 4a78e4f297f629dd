//! 会话持久化接口 - 流水线只依赖这个trait，不关心背后的存储形态

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::types::ResearchResult;

/// 存储统计信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_sessions: usize,
    pub total_personas: usize,
    pub total_interviews: usize,
}

/// 会话存储接口
///
/// `save` 是以session_id为自然键的幂等upsert：会话字段整体覆盖，
/// 画像与访谈等子记录删除后重插，重试不会产生重复子记录。
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save(&self, result: &ResearchResult) -> Result<()>;

    async fn load(&self, session_id: &str) -> Result<Option<ResearchResult>>;

    async fn stats(&self) -> Result<StoreStats>;
}

/// 进程内存实现，用于测试与单机运行
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, ResearchResult>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn save(&self, result: &ResearchResult) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        // 整体替换：子记录随会话一起删除重插
        sessions.insert(result.session_id.clone(), result.clone());
        Ok(())
    }

    async fn load(&self, session_id: &str) -> Result<Option<ResearchResult>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).cloned())
    }

    async fn stats(&self) -> Result<StoreStats> {
        let sessions = self.sessions.read().await;
        Ok(StoreStats {
            total_sessions: sessions.len(),
            total_personas: sessions.values().map(|s| s.personas.len()).sum(),
            total_interviews: sessions.values().map(|s| s.interviews.len()).sum(),
        })
    }
}
