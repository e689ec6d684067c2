use axum::{Json, Router, extract::State, routing::get};
use axum_extra::extract::Query;
use chrono::Local;
use serde::{Deserialize, Serialize};

use super::Result;
use crate::{
    activity::{
        DEFAULT_HISTORY_LIMIT, DayBucket, GrowthMetrics, Heatmap, HistoryDay, MonthBucket,
        aggregate_months, bucket_by_day, build_heatmap, commit_history, growth_metrics,
    },
    content::TypeFilter,
    state::AppState,
};

/// 配置活动统计路由，时间一律按服务所在时区计算。
///
/// - `GET /activity/days`：按日分组
/// - `GET /activity/heatmap`：近一年热力图
/// - `GET /activity/growth`：今年的月度统计
/// - `GET /activity/history`：提交记录
pub fn setup_route() -> Router<AppState> {
    Router::new()
        .route("/activity/days", get(activity_days))
        .route("/activity/heatmap", get(activity_heatmap))
        .route("/activity/growth", get(activity_growth))
        .route("/activity/history", get(activity_history))
}

async fn activity_days(State(app): State<AppState>) -> Result<Json<Vec<DayBucket>>> {
    let contents = app.repo().load()?;
    Ok(Json(bucket_by_day(&contents, &Local).into_values().collect()))
}

async fn activity_heatmap(State(app): State<AppState>) -> Result<Json<Heatmap>> {
    let contents = app.repo().load()?;
    let buckets = bucket_by_day(&contents, &Local);
    Ok(Json(build_heatmap(&buckets, app.today())))
}

#[derive(Debug, Serialize)]
pub struct Growth {
    months: Vec<MonthBucket>,
    metrics: GrowthMetrics,
}

async fn activity_growth(State(app): State<AppState>) -> Result<Json<Growth>> {
    let contents = app.repo().load()?;
    let months = aggregate_months(&contents, &Local, app.today());
    let metrics = growth_metrics(&months);
    Ok(Json(Growth { months, metrics }))
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HistoryParams {
    #[serde(rename = "type")]
    kind: TypeFilter,
    limit: usize,
}

impl Default for HistoryParams {
    fn default() -> Self {
        Self {
            kind: TypeFilter::All,
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

async fn activity_history(
    Query(params): Query<HistoryParams>,
    State(app): State<AppState>,
) -> Result<Json<Vec<HistoryDay>>> {
    let contents = app.repo().load()?;
    Ok(Json(commit_history(
        &contents,
        &Local,
        params.kind,
        params.limit,
    )))
}
