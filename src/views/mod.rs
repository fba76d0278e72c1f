pub mod auth;
pub mod dashboard;
pub mod home;
pub mod products;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(home::index))
        .route("/auth/login", get(auth::login_page))
        .route("/register", get(auth::register_page))
        .route("/dashboard", get(dashboard::index))
        .route("/admin/products/new", get(products::new_product_page))
        .route("/admin/products/{id}/edit", get(products::edit_product_page))
}
