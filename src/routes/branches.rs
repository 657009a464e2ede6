use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::branches::{BranchList, CreateBranchRequest, UpdateBranchRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Branch,
    response::ApiResponse,
    services::branch_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_branch).get(list_branches))
        .route("/{id}", get(get_branch).put(update_branch))
}

#[utoipa::path(
    get,
    path = "/api/branches",
    responses(
        (status = 200, description = "List branches", body = ApiResponse<BranchList>),
    ),
    security(("bearer_auth" = [])),
    tag = "Branches"
)]
pub async fn list_branches(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<BranchList>>> {
    let resp = branch_service::list_branches(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/branches/{id}",
    params(("id" = Uuid, Path, description = "Branch ID")),
    responses(
        (status = 200, description = "Get branch", body = ApiResponse<Branch>),
        (status = 404, description = "Branch not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Branches"
)]
pub async fn get_branch(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Branch>>> {
    let resp = branch_service::get_branch(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/branches",
    request_body = CreateBranchRequest,
    responses(
        (status = 200, description = "Branch created", body = ApiResponse<Branch>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Branches"
)]
pub async fn create_branch(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateBranchRequest>,
) -> AppResult<Json<ApiResponse<Branch>>> {
    let resp = branch_service::create_branch(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/branches/{id}",
    params(("id" = Uuid, Path, description = "Branch ID")),
    request_body = UpdateBranchRequest,
    responses(
        (status = 200, description = "Updated branch", body = ApiResponse<Branch>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Branch not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Branches"
)]
pub async fn update_branch(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBranchRequest>,
) -> AppResult<Json<ApiResponse<Branch>>> {
    let resp = branch_service::update_branch(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
