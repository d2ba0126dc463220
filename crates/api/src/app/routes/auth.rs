use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::error;

use crate::app::dto::{AuthRequest, AuthResponse, ValidateQuery, ValidateResponse};
use crate::app::errors;
use crate::app::services::AppServices;

pub async fn issue_token(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> axum::response::Response {
    let req: AuthRequest = match errors::parse_json_body(&body) {
        Ok(req) => req,
        Err(resp) => return resp,
    };

    if req.email.is_empty() || req.password.is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "email and password are required",
        );
    }

    match services.auth.generate_token(&req.email, &req.password) {
        Ok(token) => Json(AuthResponse { token }).into_response(),
        Err(e) => {
            error!(error = %e, "token issuance failed");
            errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "token_error", e.to_string())
        }
    }
}

pub async fn validate_token(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<ValidateQuery>,
) -> axum::response::Response {
    let token = query.token;
    if token.is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "token query parameter is required",
        );
    }

    Json(ValidateResponse {
        valid: services.auth.validate_token(&token),
    })
    .into_response()
}
