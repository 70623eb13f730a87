//! Operation-level failures.
//!
//! Every public operation logs its underlying cause and then fails with one
//! fixed, operation-specific message. Callers only learn that the operation
//! failed, never why.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Failed to clear data")]
    ClearData,
    #[error("Failed to reindex news")]
    Reindex,
    #[error("Failed to reindex news to Elasticsearch")]
    ReindexToSearch,
    #[error("Failed to search news")]
    Search,
    #[error("Failed to seed news")]
    Seed,
    #[error("Failed to fetch news")]
    FetchNews,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
    pub error: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let body = ErrorResponse {
            status_code: status.as_u16(),
            message: self.to_string(),
            error: "Internal Server Error".to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Logs `err` under `context` and converts it to the operation's failure.
pub(crate) fn log_and_fail(
    context: &str,
    failure: ServiceError,
) -> impl FnOnce(anyhow::Error) -> ServiceError + '_ {
    move |err| {
        tracing::error!("{}: {:#}", context, err);
        failure
    }
}
