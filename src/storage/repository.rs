use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Local, Utc};
use serde::de::DeserializeOwned;

use super::{KeyValueStore, keys};
use crate::{
    content::{ContentRecord, sample_contents},
    error::{Error, Result},
    folder::{Folder, FolderSelection, FolderTree},
    profile::{NotificationSettings, Profile, ProfileUpdate, StatSnapshot},
};

/// 删除等破坏性操作的确认状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Cancelled
        }
    }
}

/// 内容、文件夹、资料和设置的读写入口
///
/// `contents` 在内存中缓存，每次写入后缓存失效，下次读取时重新解析。
/// 对 `contents` 和 `folders` 的“读-改-写”各自在一把锁内完成。
pub struct Repository {
    kv: Arc<dyn KeyValueStore>,
    sample_data: bool,
    contents: Mutex<Option<Vec<ContentRecord>>>,
    folders: Mutex<()>,
}

impl Repository {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            sample_data: false,
            contents: Mutex::new(None),
            folders: Mutex::new(()),
        }
    }

    /// 没有保存过内容时是否用示例数据填充
    pub fn with_sample_data(mut self, enabled: bool) -> Self {
        self.sample_data = enabled;
        self
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.kv.as_ref()
    }

    /// 读取全部内容
    ///
    /// 键不存在时返回示例数据（若启用）或空列表；JSON 损坏时记录警告并返回空列表。
    pub fn load(&self) -> Result<Vec<ContentRecord>> {
        let mut cache = self.lock_contents();
        Ok(self.cached(&mut cache)?.clone())
    }

    /// 整体写回内容列表
    pub fn save(&self, contents: &[ContentRecord]) -> Result<()> {
        let mut cache = self.lock_contents();
        self.write_contents(&mut cache, contents)
    }

    /// 删除内容，需要确认；取消时不做任何修改
    ///
    /// 删除后把 `totalContents` 同步为剩余数量。
    pub fn delete_content(&self, id: &str, confirmation: Confirmation) -> Result<ContentRecord> {
        if confirmation == Confirmation::Cancelled {
            return Err(Error::ConfirmationRequired);
        }

        let mut cache = self.lock_contents();
        let mut contents = self.cached(&mut cache)?.clone();

        let index = contents
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let removed = contents.remove(index);

        self.write_contents(&mut cache, &contents)?;
        self.kv
            .set(keys::TOTAL_CONTENTS, &contents.len().to_string())?;

        tracing::info!(id, remaining = contents.len(), "content deleted");
        Ok(removed)
    }

    pub fn rename_content(&self, id: &str, title: &str) -> Result<ContentRecord> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput("title must not be empty"));
        }

        self.modify_one(id, |record| record.title = title.to_string())
    }

    pub fn toggle_public(&self, id: &str) -> Result<ContentRecord> {
        self.modify_one(id, |record| record.is_public = !record.is_public)
    }

    /// 移动到文件夹，`None` 表示移出文件夹
    ///
    /// 文件夹名称在移动时复制到内容上；找不到的文件夹 id 也会被接受，名称留空。
    pub fn move_to_folder(&self, id: &str, folder_id: Option<&str>) -> Result<ContentRecord> {
        let folders = self.folders()?;

        self.modify(|contents| {
            let folder_name = folder_id.and_then(|fid| {
                FolderTree::build(&folders, contents)
                    .get(fid)
                    .map(|f| f.name.clone())
            });

            let record = contents
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| Error::NotFound(id.to_string()))?;
            record.folder_id = folder_id.map(str::to_string);
            record.folder_name = folder_name;
            Ok(record.clone())
        })
    }

    /// 读取文件夹，JSON 损坏时返回空列表
    pub fn folders(&self) -> Result<Vec<Folder>> {
        self.read_json(keys::FOLDERS)
            .map(|folders: Option<Vec<Folder>>| folders.unwrap_or_default())
    }

    pub fn folder_tree(&self) -> Result<FolderTree> {
        let folders = self.folders()?;
        let contents = self.load()?;
        Ok(FolderTree::build(&folders, &contents))
    }

    /// 新建文件夹并追加保存，id 冲突时顺延一毫秒
    pub fn create_folder(
        &self,
        name: &str,
        selection: &FolderSelection,
        now: DateTime<Utc>,
    ) -> Result<Folder> {
        let _guard = self.folders.lock().unwrap_or_else(PoisonError::into_inner);
        let mut folders = self.folders()?;

        let mut folder = Folder::create(name, selection, now)?;
        let mut at = now;
        while folders.iter().any(|f| f.id == folder.id) {
            at += Duration::milliseconds(1);
            folder = Folder::create(name, selection, at)?;
        }

        folders.push(folder.clone());
        self.kv.set(keys::FOLDERS, &serde_json::to_string(&folders)?)?;

        tracing::info!(id = %folder.id, parent = ?folder.parent_id, "folder created");
        Ok(folder)
    }

    pub fn profile(&self) -> Result<Profile> {
        let defaults = Profile::default();

        Ok(Profile {
            nickname: self
                .kv
                .get(keys::NICKNAME)?
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.nickname),
            bio: self.kv.get(keys::BIO)?.unwrap_or_default(),
            profile_image: self.kv.get(keys::PROFILE_IMAGE)?.unwrap_or_default(),
            github_username: self.kv.get(keys::GITHUB_USERNAME)?.unwrap_or_default(),
            github_connected: self.kv.get(keys::GITHUB_CONNECTED)?.as_deref() == Some("true"),
            is_profile_public: self
                .kv
                .get(keys::IS_PROFILE_PUBLIC)?
                .map_or(defaults.is_profile_public, |s| s == "true"),
        })
    }

    pub fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile> {
        let image = update.validated_image()?;

        self.kv.set(keys::NICKNAME, &update.nickname)?;
        self.kv.set(keys::BIO, &update.bio)?;
        self.kv
            .set(keys::IS_PROFILE_PUBLIC, &update.is_profile_public.to_string())?;
        if let Some(image) = image {
            self.kv.set(keys::PROFILE_IMAGE, image)?;
        }

        self.profile()
    }

    pub fn notifications(&self) -> Result<NotificationSettings> {
        self.read_json(keys::NOTIFICATIONS)
            .map(Option::unwrap_or_default)
    }

    pub fn save_notifications(&self, settings: &NotificationSettings) -> Result<()> {
        self.kv
            .set(keys::NOTIFICATIONS, &serde_json::to_string(settings)?)
    }

    /// 读取统计快照，无法解析的值按 0 处理
    pub fn stats(&self) -> Result<StatSnapshot> {
        let number = |key: &str| -> Result<u64> {
            Ok(self
                .kv
                .get(key)?
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(0))
        };

        Ok(StatSnapshot {
            total_commits: number(keys::TOTAL_COMMITS)?,
            streak_days: number(keys::STREAK_DAYS)?,
            total_contents: number(keys::TOTAL_CONTENTS)?,
            this_month_activity: number(keys::THIS_MONTH_ACTIVITY)?,
        })
    }
}

impl Repository {
    fn lock_contents(&self) -> std::sync::MutexGuard<'_, Option<Vec<ContentRecord>>> {
        self.contents.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cached<'a>(
        &self,
        cache: &'a mut Option<Vec<ContentRecord>>,
    ) -> Result<&'a mut Vec<ContentRecord>> {
        if cache.is_none() {
            *cache = Some(self.read_contents()?);
        }
        Ok(cache.get_or_insert_with(Vec::new))
    }

    fn read_contents(&self) -> Result<Vec<ContentRecord>> {
        if self.kv.get(keys::CONTENTS)?.is_none() && self.sample_data {
            tracing::info!("no saved contents, using sample data");
            return Ok(sample_contents(Local::now().date_naive()));
        }

        self.read_json(keys::CONTENTS)
            .map(|contents: Option<Vec<ContentRecord>>| contents.unwrap_or_default())
    }

    fn write_contents(
        &self,
        cache: &mut Option<Vec<ContentRecord>>,
        contents: &[ContentRecord],
    ) -> Result<()> {
        self.kv
            .set(keys::CONTENTS, &serde_json::to_string(contents)?)?;
        *cache = None;
        Ok(())
    }

    fn modify<T>(&self, f: impl FnOnce(&mut Vec<ContentRecord>) -> Result<T>) -> Result<T> {
        let mut cache = self.lock_contents();
        let mut contents = self.cached(&mut cache)?.clone();
        let value = f(&mut contents)?;
        self.write_contents(&mut cache, &contents)?;
        Ok(value)
    }

    fn modify_one(&self, id: &str, f: impl FnOnce(&mut ContentRecord)) -> Result<ContentRecord> {
        self.modify(|contents| {
            let record = contents
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| Error::NotFound(id.to_string()))?;
            f(record);
            Ok(record.clone())
        })
    }

    /// 读取 JSON 值；键不存在返回 `None`，解析失败记录警告后同样返回 `None`
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(%e, key, "malformed stored json, ignoring");
                Ok(None)
            }
        }
    }
}
