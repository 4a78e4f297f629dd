//! 工作流注册表 - 以会话为键的活跃跟踪器存储
//!
//! 取代进程级全局字典的显式存储：容量与过期时间都有上限，由流水线持有注入，
//! 长时间运行的进程不会无限累积已结束会话的跟踪器。

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::RegistryConfig;

use super::{WorkflowProgress, WorkflowTracker};

/// 共享的跟踪器句柄：流水线持写端，进度轮询方持读端
pub type SharedTracker = Arc<RwLock<WorkflowTracker>>;

struct RegistryEntry {
    tracker: SharedTracker,
    created_at: DateTime<Utc>,
}

/// 工作流注册表
pub struct WorkflowRegistry {
    entries: RwLock<HashMap<String, RegistryEntry>>,
    capacity: usize,
    ttl: Duration,
}

impl WorkflowRegistry {
    pub fn new(config: &RegistryConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: config.capacity.max(1),
            ttl: Duration::minutes(config.expire_minutes.max(1) as i64),
        }
    }

    /// 为会话创建新的跟踪器并登记。容量满时淘汰最旧条目
    pub async fn create(&self, session_id: &str, research_question: &str) -> SharedTracker {
        let tracker: SharedTracker =
            Arc::new(RwLock::new(WorkflowTracker::new(session_id, research_question)));

        let mut entries = self.entries.write().await;
        Self::evict_expired(&mut entries, self.ttl);

        if entries.len() >= self.capacity && !entries.contains_key(session_id) {
            let oldest_key = entries
                .iter()
                .min_by_key(|(_, entry)| entry.created_at)
                .map(|(key, _)| key.clone());
            if let Some(oldest_key) = oldest_key {
                entries.remove(&oldest_key);
            }
        }

        entries.insert(
            session_id.to_string(),
            RegistryEntry {
                tracker: tracker.clone(),
                created_at: Utc::now(),
            },
        );

        tracker
    }

    /// 查找会话的跟踪器，过期条目在此被清除
    pub async fn get(&self, session_id: &str) -> Option<SharedTracker> {
        let mut entries = self.entries.write().await;
        Self::evict_expired(&mut entries, self.ttl);
        entries.get(session_id).map(|entry| entry.tracker.clone())
    }

    /// 获取会话的进度快照
    pub async fn progress(&self, session_id: &str) -> Option<WorkflowProgress> {
        let tracker = self.get(session_id).await?;
        let tracker = tracker.read().await;
        Some(tracker.get_progress())
    }

    /// 显式移除会话的跟踪器
    pub async fn remove(&self, session_id: &str) -> bool {
        let mut entries = self.entries.write().await;
        entries.remove(session_id).is_some()
    }

    /// 当前登记的会话数量
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// 当前登记的全部会话id
    pub async fn session_ids(&self) -> Vec<String> {
        self.entries.read().await.keys().cloned().collect()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn evict_expired(entries: &mut HashMap<String, RegistryEntry>, ttl: Duration) {
        let now = Utc::now();
        entries.retain(|_, entry| now - entry.created_at < ttl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(capacity: usize, expire_minutes: u64) -> WorkflowRegistry {
        WorkflowRegistry::new(&RegistryConfig {
            capacity,
            expire_minutes,
        })
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let registry = registry(4, 60);

        let tracker = registry.create("session-1", "How do teams debug?").await;
        {
            let mut tracker = tracker.write().await;
            tracker.start_step("setup", None);
        }

        let found = registry.get("session-1").await.unwrap();
        let found = found.read().await;
        assert_eq!(found.session_id, "session-1");
        assert!(found.is_active());

        assert!(registry.get("session-unknown").await.is_none());
    }

    #[tokio::test]
    async fn test_progress_snapshot() {
        let registry = registry(4, 60);
        let tracker = registry.create("session-1", "question").await;

        {
            let mut tracker = tracker.write().await;
            tracker.start_step("setup", None);
            tracker.complete_step("setup", None);
        }

        let progress = registry.progress("session-1").await.unwrap();
        assert_eq!(progress.completed_steps, 1);
        assert!(progress.progress_percentage > 0.0);

        assert!(registry.progress("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let registry = registry(2, 60);

        registry.create("session-1", "q1").await;
        registry.create("session-2", "q2").await;
        registry.create("session-3", "q3").await;

        assert_eq!(registry.len().await, 2);
        assert!(registry.get("session-1").await.is_none());
        assert!(registry.get("session-3").await.is_some());
    }

    #[tokio::test]
    async fn test_remove() {
        let registry = registry(4, 60);
        registry.create("session-1", "q").await;

        assert!(registry.remove("session-1").await);
        assert!(!registry.remove("session-1").await);
        assert!(registry.is_empty().await);
    }
}
