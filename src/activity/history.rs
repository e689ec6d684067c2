use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

use super::ActivityDays;
use crate::content::{ContentRecord, TypeFilter};

/// 默认展示的天数
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct HistoryDay {
    pub date: NaiveDate,
    pub contents: Vec<ContentRecord>,
}

/// 按天整理的提交记录，新的日期在前
///
/// 分组规则与 [`super::bucket_by_day`] 相同。按类型筛选后为空的日期会被移除，
/// 最后只保留前 `limit` 天。
pub fn commit_history<Tz: TimeZone>(
    contents: &[ContentRecord],
    tz: &Tz,
    filter: TypeFilter,
    limit: usize,
) -> Vec<HistoryDay> {
    let mut grouped: BTreeMap<NaiveDate, Vec<ContentRecord>> = BTreeMap::new();

    for record in contents.iter().filter(|c| filter.matches(c.kind)) {
        for date in ActivityDays::of(record, tz).iter() {
            grouped.entry(date).or_default().push(record.clone());
        }
    }

    grouped
        .into_iter()
        .rev()
        .take(limit)
        .map(|(date, contents)| HistoryDay { date, contents })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::content::ContentType;

    fn record(id: &str, kind: ContentType, day: u32, updated_day: u32) -> ContentRecord {
        let mut r = ContentRecord::new(id, kind, Utc.with_ymd_and_hms(2024, 4, day, 9, 0, 0).unwrap());
        r.updated_at = Utc.with_ymd_and_hms(2024, 4, updated_day, 9, 0, 0).unwrap();
        r
    }

    #[test]
    fn test_history_newest_first() {
        let contents = vec![
            record("a", ContentType::Blog, 1, 1),
            record("b", ContentType::Resume, 2, 5),
            record("c", ContentType::Blog, 3, 3),
        ];
        let history = commit_history(&contents, &Utc, TypeFilter::All, DEFAULT_HISTORY_LIMIT);

        let days: Vec<u32> = history.iter().map(|h| chrono::Datelike::day(&h.date)).collect();
        assert_eq!(days, [5, 3, 2, 1]);
        assert_eq!(history[0].contents[0].id, "b");
    }

    #[test]
    fn test_history_filter_and_limit() {
        let contents = vec![
            record("a", ContentType::Blog, 1, 1),
            record("b", ContentType::Resume, 2, 5),
            record("c", ContentType::Blog, 3, 3),
            record("d", ContentType::Blog, 4, 4),
        ];

        let history = commit_history(&contents, &Utc, TypeFilter::Resume, DEFAULT_HISTORY_LIMIT);
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|h| h.contents.iter().all(|c| c.kind == ContentType::Resume)));

        let history = commit_history(&contents, &Utc, TypeFilter::Blog, 2);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].contents[0].id, "d");
        assert_eq!(history[1].contents[0].id, "c");
    }
}
