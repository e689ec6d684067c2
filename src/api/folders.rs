use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use axum_extra::extract::Query;
use chrono::Utc;
use serde::Deserialize;

use super::Result;
use crate::{
    folder::{Folder, FolderEntry, FolderSelection},
    state::AppState,
};

/// 配置文件夹相关路由。
///
/// - `GET /folders`：侧边栏可见的文件夹
/// - `POST /folders`：在选中的文件夹下新建文件夹
pub fn setup_route() -> Router<AppState> {
    Router::new().route("/folders", get(folder_list).post(folder_create))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FolderParams {
    selected: Option<String>,
}

async fn folder_list(
    Query(params): Query<FolderParams>,
    State(app): State<AppState>,
) -> Result<Json<Vec<FolderEntry>>> {
    let selection = FolderSelection::parse(params.selected.as_deref());
    let tree = app.repo().folder_tree()?;
    Ok(Json(tree.visible(&selection)))
}

#[derive(Debug, Deserialize)]
pub struct CreateFolderBody {
    name: String,
    /// 当前选中的文件夹，为空或 `all` 时新建根文件夹
    #[serde(default)]
    selected: Option<String>,
}

async fn folder_create(
    State(app): State<AppState>,
    Json(body): Json<CreateFolderBody>,
) -> Result<(StatusCode, Json<Folder>)> {
    let selection = FolderSelection::parse(body.selected.as_deref());
    let folder = app.repo().create_folder(&body.name, &selection, Utc::now())?;
    Ok((StatusCode::CREATED, Json(folder)))
}
