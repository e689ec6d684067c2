use std::io;

use axum::{http::StatusCode, response::IntoResponse};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] toml::de::Error),

    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("content not found: {0}")]
    NotFound(String),

    /// 破坏性操作没有得到确认，状态未改变
    #[error("confirmation required")]
    ConfirmationRequired,

    /// 尚未提供的功能，只返回提示
    #[error("{0}")]
    Unsupported(&'static str),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        match self {
            Error::Io(e) => {
                tracing::error!(%e, "store io error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            .into_response(),
            Error::Json(e) => {
                tracing::error!(%e, "json encode error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            .into_response(),
            Error::Config(e) => {
                tracing::error!(%e, "config error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            .into_response(),
            Error::InvalidInput(s) => (StatusCode::BAD_REQUEST, s).into_response(),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, "NOT FOUND").into_response(),
            Error::ConfirmationRequired => {
                (StatusCode::CONFLICT, "confirmation required").into_response()
            }
            Error::Unsupported(s) => (StatusCode::NOT_IMPLEMENTED, s).into_response(),
        }
    }
}
