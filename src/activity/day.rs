use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

use crate::content::{ContentRecord, ContentRef};

/// 一条记录产生的活动日期
///
/// 每条记录最多计入两个日期：创建日，以及与创建日不同的修改日。
/// 同一天内创建并修改只算一次。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityDays {
    pub created: NaiveDate,
    pub updated: Option<NaiveDate>,
}

impl ActivityDays {
    pub fn of<Tz: TimeZone>(record: &ContentRecord, tz: &Tz) -> Self {
        let created = record.created_at.with_timezone(tz).date_naive();
        let updated = record.updated_at.with_timezone(tz).date_naive();

        Self {
            created,
            updated: (updated != created).then_some(updated),
        }
    }

    pub fn iter(self) -> impl Iterator<Item = NaiveDate> {
        std::iter::once(self.created).chain(self.updated)
    }
}

/// 某一天的活动
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub count: usize,
    pub contents: Vec<ContentRef>,
}

impl DayBucket {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            count: 0,
            contents: Vec::new(),
        }
    }
}

/// 按本地日历日分组，不做时间范围裁剪
pub fn bucket_by_day<Tz: TimeZone>(
    contents: &[ContentRecord],
    tz: &Tz,
) -> BTreeMap<NaiveDate, DayBucket> {
    let mut buckets = BTreeMap::new();

    for record in contents {
        for date in ActivityDays::of(record, tz).iter() {
            let bucket = buckets
                .entry(date)
                .or_insert_with(|| DayBucket::new(date));
            bucket.count += 1;
            bucket.contents.push(record.to_ref());
        }
    }

    buckets
}
