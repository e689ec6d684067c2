mod file;
pub mod keys;
mod kv;
mod repository;

use std::{path::Path, sync::Arc};

pub use self::{
    file::FileStore,
    kv::{KeyValueStore, MemoryStore},
    repository::{Confirmation, Repository},
};

use crate::error::Result;

/// 根据配置打开存储：给出路径时使用文件存储，否则使用内存存储
pub fn open_store(path: Option<&Path>) -> Result<Arc<dyn KeyValueStore>> {
    Ok(match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "using file store");
            Arc::new(FileStore::open(path)?)
        }
        None => {
            tracing::warn!("no store path configured, data will not survive restart");
            Arc::new(MemoryStore::new())
        }
    })
}
