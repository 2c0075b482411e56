//! Request handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::AppState;

/// Body of `POST /ask`
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Successful answer
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Failure of an `/ask` request
///
/// Pipeline errors are reported as 500 with the error text in `detail`, the
/// same for every stage. The text may carry upstream details (URLs, status
/// bodies) and is returned to the caller as-is.
#[derive(Debug)]
pub enum ApiError {
    Rejected(JsonRejection),
    Pipeline(ragapi_core::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection)
    }
}

impl From<ragapi_core::Error> for ApiError {
    fn from(err: ragapi_core::Error) -> Self {
        ApiError::Pipeline(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Rejected(rejection) => {
                tracing::debug!(status = %rejection.status(), "rejected request body");
                let body = Json(json!({ "detail": rejection.body_text() }));
                (rejection.status(), body).into_response()
            }
            ApiError::Pipeline(err) => {
                tracing::error!(error = %err, "failed to answer question");
                let body = Json(json!({ "detail": err.to_string() }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

/// Liveness check
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "return": "welcome" }))
}

/// Answer a question
pub async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(request) = payload?;
    tracing::info!(question_len = request.question.len(), "answering question");

    let answer = state.chain.invoke(&request.question).await?;
    Ok(Json(AskResponse { answer }))
}
