use anyhow::Result;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;

use crate::config::CacheConfig;

/// 缓存管理器 - 以prompt哈希为键缓存模型原始响应
pub struct CacheManager {
    config: CacheConfig,
}

/// 缓存条目
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    pub timestamp: u64,
    /// prompt的MD5哈希值，用于缓存键的生成和验证
    pub prompt_hash: String,
}

impl CacheManager {
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    /// 生成prompt的MD5哈希
    pub fn hash_prompt(&self, prompt: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(prompt.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// 获取缓存文件路径
    fn get_cache_path(&self, category: &str, hash: &str) -> PathBuf {
        self.config
            .cache_dir
            .join(category)
            .join(format!("{}.json", hash))
    }

    /// 检查缓存是否过期
    fn is_expired(&self, timestamp: u64) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let expire_seconds = self.config.expire_hours * 3600;
        now.saturating_sub(timestamp) > expire_seconds
    }

    /// 获取缓存
    pub async fn get<T>(&self, category: &str, prompt: &str) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        if !self.config.enabled {
            return Ok(None);
        }

        let hash = self.hash_prompt(prompt);
        let cache_path = self.get_cache_path(category, &hash);

        if !cache_path.exists() {
            return Ok(None);
        }

        match fs::read_to_string(&cache_path).await {
            Ok(content) => match serde_json::from_str::<CacheEntry<T>>(&content) {
                Ok(entry) => {
                    if self.is_expired(entry.timestamp) {
                        // 删除过期缓存
                        let _ = fs::remove_file(&cache_path).await;
                        return Ok(None);
                    }
                    Ok(Some(entry.data))
                }
                Err(e) => {
                    eprintln!("⚠️ 缓存反序列化失败({}): {}", category, e);
                    Ok(None)
                }
            },
            Err(e) => {
                eprintln!("⚠️ 缓存读取失败({}): {}", category, e);
                Ok(None)
            }
        }
    }

    /// 设置缓存
    pub async fn set<T>(&self, category: &str, prompt: &str, data: T) -> Result<()>
    where
        T: Serialize,
    {
        if !self.config.enabled {
            return Ok(());
        }

        let hash = self.hash_prompt(prompt);
        let cache_path = self.get_cache_path(category, &hash);

        // 确保目录存在
        if let Some(parent) = cache_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let entry = CacheEntry {
            data,
            timestamp,
            prompt_hash: hash,
        };

        let content = serde_json::to_string(&entry)?;
        fs::write(&cache_path, content).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cache_in(dir: &TempDir, enabled: bool) -> CacheManager {
        CacheManager::new(CacheConfig {
            enabled,
            cache_dir: dir.path().join("cache"),
            expire_hours: 1,
        })
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let cache = cache_in(&temp_dir, true);

        cache
            .set("questions", "some prompt", "response text".to_string())
            .await
            .unwrap();

        let cached: Option<String> = cache.get("questions", "some prompt").await.unwrap();
        assert_eq!(cached, Some("response text".to_string()));

        let missing: Option<String> = cache.get("questions", "other prompt").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_disabled_cache() {
        let temp_dir = TempDir::new().unwrap();
        let cache = cache_in(&temp_dir, false);

        cache
            .set("questions", "prompt", "value".to_string())
            .await
            .unwrap();
        let cached: Option<String> = cache.get("questions", "prompt").await.unwrap();
        assert!(cached.is_none());
    }

    #[test]
    fn test_hash_prompt_stable() {
        let temp_dir = TempDir::new().unwrap();
        let cache = cache_in(&temp_dir, true);

        assert_eq!(cache.hash_prompt("abc"), cache.hash_prompt("abc"));
        assert_ne!(cache.hash_prompt("abc"), cache.hash_prompt("abd"));
    }
}
