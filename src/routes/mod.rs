pub mod account;
pub mod products;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn form_routes() -> Router<SharedState> {
    Router::new()
        // Account
        .route("/register", post(account::register))
        .route("/auth/login", post(account::login))
        .route("/auth/logout", post(account::logout))
        // Products
        .route("/admin/products/new", post(products::create))
        .route("/admin/products/{id}/edit", post(products::update))
        // Side-effecting GET, link-triggered from the dashboard.
        .route("/admin/products/{id}/archive", get(products::archive))
}
