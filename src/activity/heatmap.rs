use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use super::DayBucket;
use crate::content::ContentRef;

pub const WEEKS: usize = 53;
pub const DAYS_PER_WEEK: usize = 7;

/// 窗口长度：今天往前 365 天
const WINDOW_DAYS: u64 = 365;

/// 格子的颜色等级，阈值固定
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    None,
    Low,
    Medium,
    High,
}

impl Intensity {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Self::None,
            1 => Self::Low,
            2..=3 => Self::Medium,
            _ => Self::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    /// 窗口外的格子没有日期
    pub date: Option<NaiveDate>,
    pub count: usize,
    pub level: Intensity,
    pub contents: Vec<ContentRef>,
}

impl HeatmapCell {
    fn empty() -> Self {
        Self {
            date: None,
            count: 0,
            level: Intensity::None,
            contents: Vec::new(),
        }
    }
}

/// 53 周 × 7 天的活动网格，每周从周日开始
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Heatmap {
    pub weeks: Vec<Vec<HeatmapCell>>,
    /// 窗口内有活动的天数
    pub active_days: usize,
    /// 窗口内的活动总数
    pub total_activity: usize,
}

impl Heatmap {
    pub fn cells(&self) -> impl Iterator<Item = &HeatmapCell> {
        self.weeks.iter().flatten()
    }
}

/// 把按日分组的结果投影到以 `today` 为终点的一年窗口上
pub fn build_heatmap(buckets: &BTreeMap<NaiveDate, DayBucket>, today: NaiveDate) -> Heatmap {
    let cutoff = today - Days::new(WINDOW_DAYS);
    let first_sunday = cutoff - Days::new(cutoff.weekday().num_days_from_sunday().into());

    let mut weeks = Vec::with_capacity(WEEKS);
    let mut active_days = 0;
    let mut total_activity = 0;

    for week in 0..WEEKS {
        let mut days = Vec::with_capacity(DAYS_PER_WEEK);

        for day in 0..DAYS_PER_WEEK {
            let offset = (week * DAYS_PER_WEEK + day) as u64;
            let date = first_sunday + Days::new(offset);

            if date < cutoff || date > today {
                days.push(HeatmapCell::empty());
                continue;
            }

            let cell = match buckets.get(&date) {
                Some(bucket) => HeatmapCell {
                    date: Some(date),
                    count: bucket.count,
                    level: Intensity::from_count(bucket.count),
                    contents: bucket.contents.clone(),
                },
                None => HeatmapCell {
                    date: Some(date),
                    ..HeatmapCell::empty()
                },
            };

            if cell.count > 0 {
                active_days += 1;
                total_activity += cell.count;
            }
            days.push(cell);
        }

        weeks.push(days);
    }

    Heatmap {
        weeks,
        active_days,
        total_activity,
    }
}
