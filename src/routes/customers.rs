use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
    dto::orders::OrderList,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Customer,
    response::ApiResponse,
    routes::params::{CustomerListQuery, PhoneQuery, SearchQuery},
    services::customer_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_customer).get(list_customers))
        .route("/search", get(search_customers))
        .route("/phone", get(find_by_phone))
        .route("/{id}", put(update_customer))
        .route("/{id}/orders", get(customer_orders))
}

#[utoipa::path(
    get,
    path = "/api/customers",
    params(
        ("branch_id" = Option<Uuid>, Query, description = "Limit to one branch"),
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List customers", body = ApiResponse<CustomerList>),
    ),
    security(("bearer_auth" = [])),
    tag = "Customers"
)]
pub async fn list_customers(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<CustomerListQuery>,
) -> AppResult<Json<ApiResponse<CustomerList>>> {
    let resp = customer_service::list_customers(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/customers/search",
    params(("query" = String, Query, description = "Free-text search term")),
    responses(
        (status = 200, description = "Matching customers", body = ApiResponse<CustomerList>),
    ),
    security(("bearer_auth" = [])),
    tag = "Customers"
)]
pub async fn search_customers(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<CustomerList>>> {
    let resp = customer_service::search_customers(&state, &query.query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/customers/phone",
    params(("phone" = String, Query, description = "Exact phone number")),
    responses(
        (status = 200, description = "Customer with that phone number", body = ApiResponse<Customer>),
        (status = 404, description = "No customer found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Customers"
)]
pub async fn find_by_phone(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<PhoneQuery>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let resp = customer_service::find_by_phone(&state, &query.phone).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 200, description = "Customer created", body = ApiResponse<Customer>),
        (status = 400, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCustomerRequest>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let resp = customer_service::create_customer(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Updated customer", body = ApiResponse<Customer>),
        (status = 404, description = "Customer not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Customers"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let resp = customer_service::update_customer(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}/orders",
    params(("id" = Uuid, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer order history", body = ApiResponse<OrderList>),
        (status = 404, description = "Customer not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Customers"
)]
pub async fn customer_orders(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = customer_service::customer_orders(&state, id).await?;
    Ok(Json(resp))
}
