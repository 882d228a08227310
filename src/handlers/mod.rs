pub mod catalogs;
pub mod suggest;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{manager::Manager, suggester::SuggestError};

/// Application context passed to all handlers.
pub struct Ctx {
    pub mgr: Arc<Manager>,
    pub consts: Consts,
    pub version: String,
}

/// Application constants.
#[derive(Clone, serde::Serialize)]
pub struct Consts {
    /// Upper bound on `?max=`.
    pub max_results_cap: usize,
}

impl Default for Consts {
    fn default() -> Self {
        Self {
            max_results_cap: 50,
        }
    }
}

/// API response wrapper.
#[derive(Serialize)]
pub struct ApiResp<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T: Serialize> IntoResponse for ApiResp<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub fn json<T: Serialize>(data: T) -> ApiResp<T> {
    ApiResp {
        data: Some(data),
        message: None,
    }
}

/// API error type.
#[derive(Debug)]
pub struct ApiErr {
    pub message: String,
    pub status: StatusCode,
}

impl ApiErr {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

impl<E: std::fmt::Display> From<E> for ApiErr {
    fn from(err: E) -> Self {
        Self::new(err.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiErr {
    fn into_response(self) -> Response {
        let json = Json(ApiResp::<()> {
            data: None,
            message: Some(self.message),
        });
        (self.status, json).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiErr>;

/// Map manager errors to HTTP statuses.
pub fn mgr_err(err: crate::manager::Error) -> ApiErr {
    use crate::manager::Error;

    match err {
        Error::UnknownCatalog(_) => ApiErr::new(err.to_string(), StatusCode::NOT_FOUND),
        Error::Suggest(SuggestError::TooManySuggestions) => ApiErr::new(
            "query is too broad, please be more specific",
            StatusCode::BAD_REQUEST,
        ),
        _ => err.into(),
    }
}

/// Clamp a requested result count. 0 means "catalog default".
pub fn clamp_max(max: usize, cap: usize) -> usize {
    if cap > 0 {
        max.min(cap)
    } else {
        max
    }
}

/// Generic `?max=` query param.
#[derive(Debug, serde::Deserialize, Default)]
pub struct MaxQuery {
    #[serde(default)]
    pub max: usize,
}
