use axum::{Router, routing::get};

use crate::state::AppState;

pub mod accounting;
pub mod auth;
pub mod branches;
pub mod catalog;
pub mod customers;
pub mod doc;
pub mod health;
pub mod orders;
pub mod params;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/ping", get(health::ping))
        .nest("/auth", auth::router())
        .nest("/orders", orders::router())
        .nest("/customers", customers::router())
        .nest("/branches", branches::router())
        .nest("/catalog", catalog::router())
        .nest("/accounting", accounting::router())
        .nest("/users", users::router())
}
