use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::error;

use stocklens_analytics::AnalyticsError;

pub fn analytics_error_to_response(err: AnalyticsError) -> axum::response::Response {
    match &err {
        AnalyticsError::InvalidDate { .. } => {
            json_error(StatusCode::BAD_REQUEST, "invalid_date", err.to_string())
        }
        AnalyticsError::UpstreamLoad { .. } => {
            error!(error = %err, "analytics inputs unavailable");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "upstream_error", err.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Decode a JSON body, mapping any failure to a 400 response.
pub fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, axum::response::Response> {
    serde_json::from_slice(body).map_err(|e| {
        json_error(
            StatusCode::BAD_REQUEST,
            "invalid_json",
            format!("invalid request body: {e}"),
        )
    })
}
