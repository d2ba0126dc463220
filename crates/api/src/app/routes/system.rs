use axum::{http::StatusCode, Json};

use crate::app::dto::StatusMessage;

pub async fn root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "Analytics Service is running",
    })
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
