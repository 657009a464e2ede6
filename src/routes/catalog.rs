use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::catalog::{
        BrandList, CreateBrandRequest, CreateModelRequest, CreatePartRequest, ModelList, PartList,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Brand, DeviceModel, Part},
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/brands", get(list_brands).post(create_brand))
        .route(
            "/brands/{brand_id}/models",
            get(list_models).post(create_model),
        )
        .route("/models/{model_id}/parts", get(list_parts))
        .route("/parts", post(create_part))
}

#[utoipa::path(
    get,
    path = "/api/catalog/brands",
    responses(
        (status = 200, description = "List brands", body = ApiResponse<BrandList>),
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn list_brands(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<BrandList>>> {
    let resp = catalog_service::list_brands(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/catalog/brands",
    request_body = CreateBrandRequest,
    responses(
        (status = 200, description = "Brand created", body = ApiResponse<Brand>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_brand(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateBrandRequest>,
) -> AppResult<Json<ApiResponse<Brand>>> {
    let resp = catalog_service::create_brand(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/catalog/brands/{brand_id}/models",
    params(("brand_id" = Uuid, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Models for one brand", body = ApiResponse<ModelList>),
        (status = 404, description = "Brand not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn list_models(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(brand_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ModelList>>> {
    let resp = catalog_service::list_models(&state, brand_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/catalog/brands/{brand_id}/models",
    params(("brand_id" = Uuid, Path, description = "Brand ID")),
    request_body = CreateModelRequest,
    responses(
        (status = 200, description = "Model created", body = ApiResponse<DeviceModel>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Brand not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_model(
    State(state): State<AppState>,
    user: AuthUser,
    Path(brand_id): Path<Uuid>,
    Json(payload): Json<CreateModelRequest>,
) -> AppResult<Json<ApiResponse<DeviceModel>>> {
    let resp = catalog_service::create_model(&state, &user, brand_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/catalog/models/{model_id}/parts",
    params(("model_id" = Uuid, Path, description = "Device model ID")),
    responses(
        (status = 200, description = "Parts that fit one model", body = ApiResponse<PartList>),
        (status = 404, description = "Model not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn list_parts(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(model_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PartList>>> {
    let resp = catalog_service::list_parts(&state, model_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/catalog/parts",
    request_body = CreatePartRequest,
    responses(
        (status = 200, description = "Part created", body = ApiResponse<Part>),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_part(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreatePartRequest>,
) -> AppResult<Json<ApiResponse<Part>>> {
    let resp = catalog_service::create_part(&state, &user, payload).await?;
    Ok(Json(resp))
}
