use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::AppState;
use crate::demos::{self, Demo};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub diff: Value,
}

/// What the `diff` field of a request amounts to.
enum DiffField {
    Text(String),
    /// Absent, null, "", false, or 0
    Missing,
    NotText,
}

impl From<Value> for DiffField {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) if !text.is_empty() => DiffField::Text(text),
            Value::String(_) | Value::Null | Value::Bool(false) => DiffField::Missing,
            Value::Number(n) if n.as_f64() == Some(0.0) => DiffField::Missing,
            _ => DiffField::NotText,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

pub async fn health() -> &'static str {
    "ok"
}

/// `POST /api/analyze` with `{"diff": "..."}`.
///
/// A missing, null, empty, `false`, or `0` diff is rejected with 400 before
/// the classifier is involved; any other non-string diff gets 422.
#[instrument(skip_all)]
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "rejected analyze request body");
            return error(rejection.status(), rejection.body_text());
        }
    };

    let diff = match DiffField::from(request.diff) {
        DiffField::Text(diff) => diff,
        DiffField::Missing => {
            warn!("analyze request without a diff");
            return error(StatusCode::BAD_REQUEST, "No diff provided");
        }
        DiffField::NotText => {
            warn!("analyze request with a non-string diff");
            return error(StatusCode::UNPROCESSABLE_ENTITY, "diff must be a string");
        }
    };

    if !state.response_delay.is_zero() {
        tokio::time::sleep(state.response_delay).await;
    }

    let report = state.classifier.classify(&diff);
    info!(
        bytes = diff.len(),
        risk = %report.risk_level,
        flags = report.flags.len(),
        "analyzed diff"
    );
    Json(report).into_response()
}

/// `GET /api/demos`
pub async fn list_demos() -> Json<&'static [Demo]> {
    Json(demos::DEMOS)
}
