//! 存储中使用的键

pub const CONTENTS: &str = "contents";
pub const FOLDERS: &str = "folders";

pub const NICKNAME: &str = "nickname";
pub const BIO: &str = "bio";
pub const PROFILE_IMAGE: &str = "profileImage";
pub const GITHUB_USERNAME: &str = "githubUsername";
pub const GITHUB_CONNECTED: &str = "githubConnected";
pub const IS_PROFILE_PUBLIC: &str = "isProfilePublic";

pub const TOTAL_COMMITS: &str = "totalCommits";
pub const STREAK_DAYS: &str = "streakDays";
pub const TOTAL_CONTENTS: &str = "totalContents";
pub const THIS_MONTH_ACTIVITY: &str = "thisMonthActivity";

pub const NOTIFICATIONS: &str = "notifications";
