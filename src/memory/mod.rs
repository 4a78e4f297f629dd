use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// 统一内存管理器 - 各流水线阶段通过作用域键交换数据
#[derive(Debug, Default)]
pub struct Memory {
    data: HashMap<String, Value>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 存储数据到指定作用域和键
    pub fn store<T>(&mut self, scope: &str, key: &str, data: T) -> Result<()>
    where
        T: Serialize,
    {
        let full_key = format!("{}:{}", scope, key);
        let serialized = serde_json::to_value(data)?;
        self.data.insert(full_key, serialized);
        Ok(())
    }

    /// 从指定作用域和键获取数据
    pub fn get<T>(&self, scope: &str, key: &str) -> Option<T>
    where
        T: for<'a> Deserialize<'a>,
    {
        let full_key = format!("{}:{}", scope, key);
        self.data
            .get(&full_key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// 列出指定作用域的所有键
    pub fn list_keys(&self, scope: &str) -> Vec<String> {
        let prefix = format!("{}:", scope);
        self.data
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .map(|key| key[prefix.len()..].to_string())
            .collect()
    }

    /// 检查是否存在指定数据
    pub fn has_data(&self, scope: &str, key: &str) -> bool {
        let full_key = format!("{}:{}", scope, key);
        self.data.contains_key(&full_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_get() {
        let mut memory = Memory::new();
        memory
            .store("research", "questions", vec!["Q1?".to_string()])
            .unwrap();

        let questions: Vec<String> = memory.get("research", "questions").unwrap();
        assert_eq!(questions, vec!["Q1?".to_string()]);

        assert!(memory.has_data("research", "questions"));
        assert!(!memory.has_data("research", "personas"));
    }

    #[test]
    fn test_scope_isolation() {
        let mut memory = Memory::new();
        memory.store("a", "key", 1u32).unwrap();
        memory.store("b", "key", 2u32).unwrap();

        assert_eq!(memory.get::<u32>("a", "key"), Some(1));
        assert_eq!(memory.get::<u32>("b", "key"), Some(2));
        assert_eq!(memory.list_keys("a"), vec!["key".to_string()]);
    }

    #[test]
    fn test_overwrite() {
        let mut memory = Memory::new();
        memory.store("scope", "key", "first").unwrap();
        memory.store("scope", "key", "second").unwrap();

        assert_eq!(
            memory.get::<String>("scope", "key"),
            Some("second".to_string())
        );
    }
}
