mod activity;
mod contents;
mod folders;
mod profile;

use std::time::Duration;

use axum::Router;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::instrument;

use crate::{
    error::{Error, Result},
    state::AppState,
};

/// 设置应用的路由。
///
/// 将 `/api` 下的内容、文件夹、活动统计和资料接口组合在一起，并绑定应用状态。
pub fn setup_route(app: AppState) -> Router {
    Router::new()
        .nest(
            "/api",
            contents::setup_route()
                .merge(folders::setup_route())
                .merge(activity::setup_route())
                .merge(profile::setup_route()),
        )
        .with_state(app)
}

/// 启动 HTTP 服务，并使用给定的路由处理请求。
#[instrument(name = "http server", skip(router))]
pub async fn run_server_with_router(router: Router, listen: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(listen).await?;

    tracing::info!("listening on {listen}");

    axum::serve(listener, router).await?;
    Ok(())
}

/// 启动 HTTP 服务，自动设置路由和中间件。
///
/// 1. 生成路由
/// 2. 添加日志和追踪中间件
/// 3. 启动服务器
pub async fn run_server(app: AppState, listen: &str) -> Result<()> {
    let router = setup_route(app);
    let router = add_middlewares(router);
    run_server_with_router(router, listen).await
}

/// 请求追踪只记录失败的请求，附带耗时
fn add_middlewares(router: Router) -> Router {
    let trace = TraceLayer::new_for_http()
        .on_request(())
        .on_response(())
        .on_failure(
            |class: ServerErrorsFailureClass, latency: Duration, _span: &tracing::Span| {
                tracing::error!(%class, ?latency, "request failed");
            },
        );

    router.layer(trace)
}
