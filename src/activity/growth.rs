use chrono::{Datelike, NaiveDate, TimeZone};
use serde::Serialize;

use crate::content::{ContentRecord, ContentType};

/// 某月的统计
///
/// `total` 只统计当月新写的内容，`commits` 额外包含修改。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub month: u32,
    pub blog: usize,
    pub resume: usize,
    pub portfolio: usize,
    pub total: usize,
    pub commits: usize,
}

impl MonthBucket {
    fn new(month: u32) -> Self {
        Self {
            month,
            blog: 0,
            resume: 0,
            portfolio: 0,
            total: 0,
            commits: 0,
        }
    }

    fn count_created(&mut self, kind: ContentType) {
        match kind {
            ContentType::Blog => self.blog += 1,
            ContentType::Resume => self.resume += 1,
            ContentType::Portfolio => self.portfolio += 1,
        }
        self.total += 1;
        self.commits += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthMetrics {
    pub total_growth: usize,
    /// 月均，保留一位小数
    pub average_monthly: f64,
    pub best_month: Option<u32>,
    pub best_month_count: usize,
}

/// 统计今年 1 月到本月的数据，没有数据的月份也保留
pub fn aggregate_months<Tz: TimeZone>(
    contents: &[ContentRecord],
    tz: &Tz,
    today: NaiveDate,
) -> Vec<MonthBucket> {
    let year = today.year();
    let mut months: Vec<_> = (1..=today.month()).map(MonthBucket::new).collect();

    for record in contents {
        let created = record.created_at.with_timezone(tz).date_naive();
        if let Some(m) = month_of(&mut months, year, created) {
            m.count_created(record.kind);
        }

        if record.updated_at != record.created_at {
            let updated = record.updated_at.with_timezone(tz).date_naive();
            if let Some(m) = month_of(&mut months, year, updated) {
                m.commits += 1;
            }
        }
    }

    months
}

fn month_of(months: &mut [MonthBucket], year: i32, date: NaiveDate) -> Option<&mut MonthBucket> {
    if date.year() != year {
        return None;
    }
    months.get_mut(date.month0() as usize)
}

pub fn growth_metrics(months: &[MonthBucket]) -> GrowthMetrics {
    let total_growth: usize = months.iter().map(|m| m.total).sum();

    let average_monthly = if months.is_empty() {
        0.0
    } else {
        (total_growth as f64 / months.len() as f64 * 10.0).round() / 10.0
    };

    // 并列时取最早的月份
    let best = months
        .iter()
        .fold(None::<&MonthBucket>, |best, m| match best {
            Some(b) if m.total <= b.total => Some(b),
            _ => Some(m),
        });

    GrowthMetrics {
        total_growth,
        average_monthly,
        best_month: best.map(|m| m.month),
        best_month_count: best.map_or(0, |m| m.total),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn at(y: i32, m: u32, d: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn record(id: &str, kind: ContentType, created: (i32, u32, u32), updated: (i32, u32, u32)) -> ContentRecord {
        let mut r = ContentRecord::new(id, kind, at(created.0, created.1, created.2));
        r.updated_at = at(updated.0, updated.1, updated.2);
        r
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    #[test]
    fn test_seeds_every_month_until_current() {
        let months = aggregate_months(&[], &Utc, today());
        assert_eq!(months.len(), 5);
        assert_eq!(months.iter().map(|m| m.month).collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
        assert!(months.iter().all(|m| m.total == 0 && m.commits == 0));
    }

    #[test]
    fn test_created_only_record() {
        let contents = vec![record("a", ContentType::Blog, (2024, 1, 5), (2024, 1, 5))];
        let months = aggregate_months(&contents, &Utc, today());

        assert_eq!(months[0].blog, 1);
        assert_eq!(months[0].total, 1);
        assert_eq!(months[0].commits, 1);
        assert!(months[1..].iter().all(|m| m.commits == 0));
    }

    #[test]
    fn test_edit_counts_as_commit_only() {
        let contents = vec![record("a", ContentType::Resume, (2024, 1, 5), (2024, 2, 10))];
        let months = aggregate_months(&contents, &Utc, today());

        assert_eq!((months[0].resume, months[0].total, months[0].commits), (1, 1, 1));
        assert_eq!((months[1].resume, months[1].total, months[1].commits), (0, 0, 1));
    }

    #[test]
    fn test_ignores_other_years() {
        let contents = vec![
            record("old", ContentType::Portfolio, (2023, 12, 30), (2024, 3, 1)),
            record("older", ContentType::Blog, (2022, 3, 1), (2022, 3, 1)),
        ];
        let months = aggregate_months(&contents, &Utc, today());

        assert_eq!(months.iter().map(|m| m.total).sum::<usize>(), 0);
        // 去年写的内容今年修改，仍算今年的提交
        assert_eq!(months[2].commits, 1);
    }

    #[test]
    fn test_growth_metrics() {
        let contents = vec![
            record("a", ContentType::Blog, (2024, 2, 1), (2024, 2, 1)),
            record("b", ContentType::Blog, (2024, 2, 2), (2024, 2, 2)),
            record("c", ContentType::Blog, (2024, 4, 1), (2024, 4, 1)),
            record("d", ContentType::Blog, (2024, 4, 2), (2024, 4, 2)),
            record("e", ContentType::Blog, (2024, 5, 2), (2024, 5, 2)),
        ];
        let metrics = growth_metrics(&aggregate_months(&contents, &Utc, today()));

        assert_eq!(metrics.total_growth, 5);
        assert_eq!(metrics.average_monthly, 1.0);
        assert_eq!(metrics.best_month, Some(2));
        assert_eq!(metrics.best_month_count, 2);
    }

    #[test]
    fn test_growth_metrics_rounding_and_empty() {
        let months = vec![
            MonthBucket { total: 1, ..MonthBucket::new(1) },
            MonthBucket::new(2),
            MonthBucket::new(3),
        ];
        assert_eq!(growth_metrics(&months).average_monthly, 0.3);

        let empty = growth_metrics(&[]);
        assert_eq!(empty.best_month, None);
        assert_eq!(empty.average_monthly, 0.0);

        let zeros = growth_metrics(&[MonthBucket::new(1), MonthBucket::new(2)]);
        assert_eq!(zeros.best_month, Some(1));
    }
}
