use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::accounting::{CreateEntryRequest, EntryList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{AccountingEntry, AccountingSummary},
    response::ApiResponse,
    routes::params::BranchScopedQuery,
    services::accounting_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entries).post(create_entry))
        .route("/summary", get(branch_summary))
}

#[utoipa::path(
    get,
    path = "/api/accounting",
    params(("branch_id" = Uuid, Query, description = "Branch to list entries for")),
    responses(
        (status = 200, description = "Accounting entries, newest first", body = ApiResponse<EntryList>),
    ),
    security(("bearer_auth" = [])),
    tag = "Accounting"
)]
pub async fn list_entries(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<BranchScopedQuery>,
) -> AppResult<Json<ApiResponse<EntryList>>> {
    let resp = accounting_service::list_entries(&state, query.branch_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/accounting",
    request_body = CreateEntryRequest,
    responses(
        (status = 200, description = "Entry created", body = ApiResponse<AccountingEntry>),
        (status = 400, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Accounting"
)]
pub async fn create_entry(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateEntryRequest>,
) -> AppResult<Json<ApiResponse<AccountingEntry>>> {
    let resp = accounting_service::create_entry(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/accounting/summary",
    params(("branch_id" = Uuid, Query, description = "Branch to summarize")),
    responses(
        (status = 200, description = "Branch income/expense summary", body = ApiResponse<AccountingSummary>),
    ),
    security(("bearer_auth" = [])),
    tag = "Accounting"
)]
pub async fn branch_summary(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<BranchScopedQuery>,
) -> AppResult<Json<ApiResponse<AccountingSummary>>> {
    let resp = accounting_service::branch_summary(&state, query.branch_id).await?;
    Ok(Json(resp))
}
