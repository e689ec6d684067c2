use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    content::ContentRecord,
    error::{Error, Result},
};

/// 代表“全部”的虚拟文件夹 id
pub const ALL_FOLDER_ID: &str = "all";
const ALL_FOLDER_NAME: &str = "전체";

/// 用户创建的文件夹，存放在 `folders` 键下
///
/// 只支持两层：根文件夹和它的直接子文件夹。没有环检测。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl Folder {
    /// 在当前选中的文件夹下新建，选中“全部”时建为根文件夹
    pub fn create(name: &str, selection: &FolderSelection, now: DateTime<Utc>) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("folder name must not be empty"));
        }

        Ok(Self {
            id: format!("folder-{}", now.timestamp_millis()),
            name: name.to_string(),
            parent_id: selection.folder_id().map(str::to_string),
        })
    }
}

/// 当前选中的文件夹
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FolderSelection {
    #[default]
    All,
    Folder(String),
}

impl FolderSelection {
    /// `None` 和 `"all"` 都表示全部
    pub fn parse(id: Option<&str>) -> Self {
        match id {
            None | Some(ALL_FOLDER_ID) | Some("") => Self::All,
            Some(id) => Self::Folder(id.to_string()),
        }
    }

    pub fn folder_id(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Folder(id) => Some(id.as_str()),
        }
    }

    /// 只匹配 `folderId` 完全相同的内容，不包含子文件夹
    pub fn matches(&self, record: &ContentRecord) -> bool {
        match self {
            Self::All => true,
            Self::Folder(id) => record.folder_id.as_deref() == Some(id.as_str()),
        }
    }
}

/// 带内容数量的文件夹
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderEntry {
    pub id: String,
    pub name: String,
    pub count: usize,
    pub parent_id: Option<String>,
}

/// 文件夹列表视图
///
/// 由已保存的文件夹和内容上引用的文件夹合并而成。只被内容引用、
/// 没有保存过的文件夹使用内容上缓存的 `folderName` 作为名称，视为根文件夹。
#[derive(Debug, Clone)]
pub struct FolderTree {
    entries: Vec<FolderEntry>,
    total: usize,
}

impl FolderTree {
    pub fn build(folders: &[Folder], contents: &[ContentRecord]) -> Self {
        let mut entries: Vec<FolderEntry> = folders
            .iter()
            .map(|f| FolderEntry {
                id: f.id.clone(),
                name: f.name.clone(),
                count: 0,
                parent_id: f.parent_id.clone(),
            })
            .collect();

        for record in contents {
            let (Some(id), Some(name)) = (&record.folder_id, &record.folder_name) else {
                continue;
            };
            if !entries.iter().any(|e| &e.id == id) {
                entries.push(FolderEntry {
                    id: id.clone(),
                    name: name.clone(),
                    count: 0,
                    parent_id: None,
                });
            }
        }

        for entry in &mut entries {
            entry.count = contents
                .iter()
                .filter(|c| c.folder_id.as_deref() == Some(entry.id.as_str()))
                .count();
        }

        Self {
            entries,
            total: contents.len(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&FolderEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn children<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a FolderEntry> {
        self.entries
            .iter()
            .filter(move |e| e.parent_id.as_deref() == Some(parent))
    }

    pub fn roots(&self) -> impl Iterator<Item = &FolderEntry> {
        self.entries.iter().filter(|e| e.parent_id.is_none())
    }

    /// 侧边栏上可见的文件夹
    ///
    /// 总是包含“全部”和所有根文件夹。选中子文件夹时追加它的兄弟文件夹，
    /// 选中根文件夹时追加它的子文件夹。
    pub fn visible(&self, selection: &FolderSelection) -> Vec<FolderEntry> {
        let mut visible = vec![FolderEntry {
            id: ALL_FOLDER_ID.to_string(),
            name: ALL_FOLDER_NAME.to_string(),
            count: self.total,
            parent_id: None,
        }];
        visible.extend(self.roots().cloned());

        if let Some(selected) = selection.folder_id().and_then(|id| self.get(id)) {
            let parent = selected.parent_id.as_deref().unwrap_or(&selected.id);
            visible.extend(self.children(parent).cloned());
        }

        visible
    }
}

/// 按文件夹筛选，结果按更新时间从新到旧排列
pub fn filter_by_folder<'a>(
    contents: &'a [ContentRecord],
    selection: &FolderSelection,
) -> Vec<&'a ContentRecord> {
    let mut filtered: Vec<_> = contents.iter().filter(|c| selection.matches(c)).collect();
    filtered.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    filtered
}
