use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post, put},
};
use axum_extra::extract::Query;
use serde::{Deserialize, Serialize};

use super::Result;
use crate::{
    content::{ContentRecord, ITEMS_PER_PAGE, Page, SortOption, TypeCounts, TypeFilter, search, sort},
    folder::{FolderSelection, filter_by_folder},
    state::AppState,
    storage::Confirmation,
};

/// 配置内容相关路由。
///
/// - `GET /contents`：内容列表
/// - `DELETE /contents/{id}`：删除内容，需要 `confirm=true`
/// - `PUT /contents/{id}/title`：重命名
/// - `POST /contents/{id}/visibility`：切换公开状态
/// - `PUT /contents/{id}/folder`：移动到文件夹
pub fn setup_route() -> Router<AppState> {
    Router::new()
        .route("/contents", get(content_list))
        .route("/contents/{id}", delete(content_delete))
        .route("/contents/{id}/title", put(content_rename))
        .route("/contents/{id}/visibility", post(content_toggle_public))
        .route("/contents/{id}/folder", put(content_move))
}

/// 查询参数，用于内容列表的筛选、排序和分页。
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ListParams {
    #[serde(rename = "type")]
    kind: TypeFilter,
    q: String,
    sort: SortOption,
    page: usize,
    folder: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            kind: TypeFilter::All,
            q: String::new(),
            sort: SortOption::Latest,
            page: 1,
            folder: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContentList {
    #[serde(flatten)]
    page: Page<ContentRecord>,
    /// 各类型数量，按未筛选的全部内容计算
    counts: TypeCounts,
}

/// 获取内容列表。
///
/// 依次按文件夹、类型、标题关键字筛选，再排序分页。
async fn content_list(
    Query(params): Query<ListParams>,
    State(app): State<AppState>,
) -> Result<Json<ContentList>> {
    let contents = app.repo().load()?;
    let selection = FolderSelection::parse(params.folder.as_deref());

    let in_folder = filter_by_folder(&contents, &selection);
    let mut matched = search(
        in_folder.into_iter().filter(|c| params.kind.matches(c.kind)),
        &params.q,
    );
    sort(&mut matched, params.sort);

    let items = matched.into_iter().cloned().collect();

    Ok(Json(ContentList {
        page: Page::paginate(items, params.page, ITEMS_PER_PAGE),
        counts: TypeCounts::count(&contents),
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteParams {
    confirm: bool,
}

/// 删除内容。
///
/// 没有确认时返回 409，不做任何修改。
async fn content_delete(
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
    State(app): State<AppState>,
) -> Result<Json<ContentRecord>> {
    app.repo()
        .delete_content(&id, Confirmation::from(params.confirm))
        .map(Json)
}

#[derive(Debug, Deserialize)]
pub struct RenameBody {
    title: String,
}

async fn content_rename(
    Path(id): Path<String>,
    State(app): State<AppState>,
    Json(body): Json<RenameBody>,
) -> Result<Json<ContentRecord>> {
    app.repo().rename_content(&id, &body.title).map(Json)
}

async fn content_toggle_public(
    Path(id): Path<String>,
    State(app): State<AppState>,
) -> Result<Json<ContentRecord>> {
    app.repo().toggle_public(&id).map(Json)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveBody {
    #[serde(default)]
    folder_id: Option<String>,
}

/// 移动内容到文件夹，`folderId` 为空时移出文件夹。
async fn content_move(
    Path(id): Path<String>,
    State(app): State<AppState>,
    Json(body): Json<MoveBody>,
) -> Result<Json<ContentRecord>> {
    app.repo()
        .move_to_folder(&id, body.folder_id.as_deref())
        .map(Json)
}
