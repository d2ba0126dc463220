use std::sync::Arc;

use axum::{body::Bytes, extract::Extension, http::StatusCode, response::IntoResponse, Json};
use tracing::{error, info};

use stocklens_analytics::ItemAnalyticsRequest;

use crate::app::errors;
use crate::app::services::AppServices;

pub async fn item_analytics(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> axum::response::Response {
    let req: ItemAnalyticsRequest = match errors::parse_json_body(&body) {
        Ok(req) => req,
        Err(resp) => return resp,
    };

    if req.token.is_empty() || req.start_date.is_empty() || req.finish_date.is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "token, StartDate and FinishDate are required",
        );
    }

    if !services.auth.validate_token(&req.token) {
        return errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "invalid token");
    }

    info!(start = %req.start_date, finish = %req.finish_date, "item analytics requested");

    // CPU-bound and spawns its own worker threads; keep it off the async runtime.
    let job = tokio::task::spawn_blocking(move || {
        services
            .analytics
            .get_item_analytics(&req, services.dataset.as_ref())
    })
    .await;

    match job {
        Ok(Ok(response)) => Json(response).into_response(),
        Ok(Err(e)) => errors::analytics_error_to_response(e),
        Err(e) => {
            error!(error = %e, "analytics task failed");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "analytics computation failed",
            )
        }
    }
}
