use std::fmt;

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// 内容类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Blog,
    Resume,
    Portfolio,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [Self::Blog, Self::Resume, Self::Portfolio];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Resume => "resume",
            Self::Portfolio => "portfolio",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一条内容记录（博客、自我介绍或作品集）
///
/// 以 camelCase JSON 存放在 `contents` 键下，时间为 ISO-8601 字符串。
/// `folder_name` 是移动时文件夹名称的快照，文件夹改名不会回写。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContentType,
    #[serde(default)]
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,
}

impl ContentRecord {
    pub fn new(id: impl Into<String>, kind: ContentType, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: String::new(),
            created_at,
            updated_at: created_at,
            is_public: false,
            folder_id: None,
            folder_name: None,
        }
    }

    /// 展示用标题，空标题显示为 `untitled`
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "untitled"
        } else {
            &self.title
        }
    }

    pub fn to_ref(&self) -> ContentRef {
        ContentRef {
            id: self.id.clone(),
            kind: self.kind,
            title: self.display_title().to_string(),
        }
    }
}

/// 活动统计里引用的内容摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentRef {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub title: String,
}

/// 生成示例数据：从本月起往前 6 个月，每月若干条。
///
/// 没有任何已存数据时用于填充界面，不会自动写回存储。
pub fn sample_contents(today: NaiveDate) -> Vec<ContentRecord> {
    const FOLDERS: [Option<(&str, &str)>; 4] = [
        Some(("folder-1", "프로젝트")),
        Some(("folder-2", "학습 노트")),
        Some(("folder-3", "포트폴리오")),
        None,
    ];

    let mut contents = Vec::new();
    for i in 0..6u32 {
        let Some(month) = today.checked_sub_months(Months::new(i)) else {
            continue;
        };
        let per_month = 2 + (i as usize * 3) % 5;

        for j in 0..per_month {
            let mut day = 1 + ((i as usize * 7 + j * 5) % 28) as u32;
            if i == 0 {
                day = day.min(today.day());
            }
            let Some(date) = month.with_day(day) else {
                continue;
            };
            let Some(created_at) = date
                .and_hms_opt(9, 0, 0)
                .map(|dt| Utc.from_utc_datetime(&dt))
            else {
                continue;
            };
            let kind = ContentType::ALL[(i as usize + j) % ContentType::ALL.len()];

            let mut record = ContentRecord::new(format!("sample-{i}-{j}"), kind, created_at);
            record.title = format!("{kind} {}-{}", i + 1, j + 1);
            record.is_public = (i as usize + j) % 3 != 0;
            if let Some((id, name)) = FOLDERS[(i as usize + j) % FOLDERS.len()] {
                record.folder_id = Some(id.to_string());
                record.folder_name = Some(name.to_string());
            }
            contents.push(record);
        }
    }
    contents
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserialize_with_missing_fields() {
        let json = r#"{
            "id": "a",
            "type": "blog",
            "createdAt": "2024-01-05T00:00:00.000Z",
            "updatedAt": "2024-01-05T00:00:00.000Z"
        }"#;

        let record: ContentRecord = serde_json::from_str(json).expect("parse record");
        assert_eq!(record.kind, ContentType::Blog);
        assert_eq!(record.title, "");
        assert_eq!(record.display_title(), "untitled");
        assert!(!record.is_public);
        assert!(record.folder_id.is_none());
    }

    #[test]
    fn test_record_serialize_camel_case() {
        let created = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        let mut record = ContentRecord::new("a", ContentType::Portfolio, created);
        record.folder_id = Some("folder-1".into());
        record.folder_name = Some("Projects".into());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "portfolio");
        assert_eq!(value["isPublic"], false);
        assert_eq!(value["folderId"], "folder-1");
        assert_eq!(value["folderName"], "Projects");
        assert!(value["createdAt"].as_str().unwrap().starts_with("2024-01-05T00:00:00"));
    }

    #[test]
    fn test_ref_uses_display_title() {
        let created = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        let mut record = ContentRecord::new("a", ContentType::Resume, created);
        assert_eq!(record.to_ref().title, "untitled");

        record.title = "Cover letter".into();
        let r = record.to_ref();
        assert_eq!((r.id.as_str(), r.kind, r.title.as_str()), ("a", ContentType::Resume, "Cover letter"));
    }

    #[test]
    fn test_sample_contents_within_last_six_months() {
        let today = NaiveDate::from_ymd_opt(2024, 8, 20).unwrap();
        let contents = sample_contents(today);

        assert!(!contents.is_empty());
        let earliest = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        for c in &contents {
            let day = c.created_at.date_naive();
            assert!(day >= earliest && day <= today);
            assert_eq!(c.created_at, c.updated_at);
            assert_eq!(c.folder_id.is_some(), c.folder_name.is_some());
        }
    }
}
