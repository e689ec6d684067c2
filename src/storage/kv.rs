use std::{
    collections::BTreeMap,
    sync::{PoisonError, RwLock},
};

use crate::error::Result;

/// 扁平的字符串键值存储
///
/// 不支持事务，多个进程同时写入时后写的覆盖先写的。
pub trait KeyValueStore: Send + Sync {
    /// 读取键，不存在时返回 `None`
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// 写入键
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// 删除键，键不存在时什么也不做
    fn remove(&self, key: &str) -> Result<()>;
}

/// 纯内存实现，进程退出后数据丢失
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}
