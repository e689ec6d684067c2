use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use super::{Error, Result};
use crate::{
    profile::{NotificationSettings, Profile, ProfileUpdate, StatSnapshot},
    state::AppState,
};

/// 配置资料和设置路由。
///
/// - `GET/PUT /profile`：个人资料
/// - `GET/PUT /notifications`：通知设置
/// - `GET /stats`：统计快照
/// - `POST /github/reconnect`：尚未提供，返回 501
pub fn setup_route() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile).put(profile_update))
        .route("/notifications", get(notifications).put(notifications_update))
        .route("/stats", get(stats))
        .route("/github/reconnect", post(github_reconnect))
}

async fn profile(State(app): State<AppState>) -> Result<Json<Profile>> {
    app.repo().profile().map(Json)
}

async fn profile_update(
    State(app): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Profile>> {
    app.repo().update_profile(&update).map(Json)
}

async fn notifications(State(app): State<AppState>) -> Result<Json<NotificationSettings>> {
    app.repo().notifications().map(Json)
}

async fn notifications_update(
    State(app): State<AppState>,
    Json(settings): Json<NotificationSettings>,
) -> Result<Json<NotificationSettings>> {
    app.repo().save_notifications(&settings)?;
    Ok(Json(settings))
}

async fn stats(State(app): State<AppState>) -> Result<Json<StatSnapshot>> {
    app.repo().stats().map(Json)
}

async fn github_reconnect() -> Result<()> {
    Err(Error::Unsupported("GitHub reconnect is not available yet"))
}
