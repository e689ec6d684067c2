use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_NICKNAME: &str = "사용자";

/// 个人资料，每个字段单独存成一个字符串键
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub nickname: String,
    pub bio: String,
    pub profile_image: String,
    pub github_username: String,
    pub github_connected: bool,
    pub is_profile_public: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            nickname: DEFAULT_NICKNAME.to_string(),
            bio: String::new(),
            profile_image: String::new(),
            github_username: String::new(),
            github_connected: false,
            is_profile_public: true,
        }
    }
}

/// 设置页提交的资料修改
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub nickname: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default = "default_true")]
    pub is_profile_public: bool,
    /// 为空时保留原头像
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl ProfileUpdate {
    /// 头像只接受图片的 data URL
    pub fn validated_image(&self) -> Result<Option<&str>> {
        match self.profile_image.as_deref() {
            None | Some("") => Ok(None),
            Some(image) if image.starts_with("data:image/") => Ok(Some(image)),
            Some(_) => Err(Error::InvalidInput("only image files can be uploaded")),
        }
    }
}

/// 通知设置，以 JSON 存在 `notifications` 键下
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub commit_success: bool,
    pub commit_failure: bool,
    pub content_views: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            commit_success: true,
            commit_failure: true,
            content_views: true,
        }
    }
}

/// 统计快照
///
/// 存的是数字字符串，不会根据 `contents` 重新计算；删除内容时只同步 `total_contents`。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatSnapshot {
    pub total_commits: u64,
    pub streak_days: u64,
    pub total_contents: u64,
    pub this_month_activity: u64,
}

fn default_true() -> bool {
    true
}
