use std::{
    collections::BTreeMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use tempfile::NamedTempFile;

use super::KeyValueStore;
use crate::error::Result;

/// 以单个 JSON 文件保存的键值存储
///
/// 文件内容是 `{"key": "value", ...}`。打开时整体读入内存，
/// 每次写入都把整个文件重写一遍（先写临时文件再重命名）。
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// 打开存储文件，文件不存在时视为空
    ///
    /// 文件内容无法解析时记录警告并从空存储开始，下一次写入会覆盖它。
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                tracing::warn!(%e, path = %path.display(), "malformed store file, starting empty");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(serde_json::to_string_pretty(entries)?.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(path = %self.path.display(), keys = entries.len(), "store flushed");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if !entries.contains_key(key) {
            return Ok(());
        }

        let mut next = entries.clone();
        next.remove(key);
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("blio.json");

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("nickname").unwrap(), None);
        store.set("nickname", "kim").unwrap();
        store.set("bio", "hi").unwrap();
        store.remove("bio").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("nickname").unwrap().as_deref(), Some("kim"));
        assert_eq!(reopened.get("bio").unwrap(), None);

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.len(), 1);
    }

    #[test]
    fn test_file_store_malformed_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blio.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("contents").unwrap(), None);

        store.set("contents", "[]").unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("contents").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_failed_write_leaves_entries_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("blocked");
        let store = FileStore::open(blocked.join("blio.json")).unwrap();

        // 目录位置被普通文件占用，写入必然失败
        fs::write(&blocked, "").unwrap();

        assert!(store.set("nickname", "kim").is_err());
        assert_eq!(store.get("nickname").unwrap(), None);

        fs::remove_file(&blocked).unwrap();
        store.set("nickname", "kim").unwrap();

        fs::remove_dir_all(&blocked).unwrap();
        fs::write(&blocked, "").unwrap();

        assert!(store.remove("nickname").is_err());
        assert_eq!(store.get("nickname").unwrap().as_deref(), Some("kim"));
    }
}
