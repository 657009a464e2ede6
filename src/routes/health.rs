use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::response::{ApiResponse, Meta};

#[derive(Serialize, ToSchema)]
pub struct PingData {
    pub status: String,
}

/// Unauthenticated liveness probe; everything else under `/api` needs a token.
#[utoipa::path(
    get,
    path = "/api/ping",
    responses(
        (status = 200, description = "OK", body = ApiResponse<PingData>),
    ),
    tag = "Health"
)]
pub async fn ping() -> Json<ApiResponse<PingData>> {
    let data = PingData {
        status: "ok".to_string(),
    };

    Json(ApiResponse::success("pong", data, Some(Meta::empty())))
}
