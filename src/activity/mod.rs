//! 活动统计：按日分组、热力图、月度成长和提交记录
//!
//! 全部是对内容列表的纯计算，每次内容变化后重新计算即可。

mod day;
mod growth;
mod heatmap;
mod history;

pub use self::{
    day::{ActivityDays, DayBucket, bucket_by_day},
    growth::{GrowthMetrics, MonthBucket, aggregate_months, growth_metrics},
    heatmap::{DAYS_PER_WEEK, Heatmap, HeatmapCell, Intensity, WEEKS, build_heatmap},
    history::{DEFAULT_HISTORY_LIMIT, HistoryDay, commit_history},
};
