pub mod auth;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod flash;
pub mod forms;
pub mod lifecycle;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod slug;
pub mod state;
pub mod upload;
pub mod views;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::db::{ProductStore, UserStore};
use crate::lifecycle::{ProductLifecycle, Registration};
use crate::middleware::auth_redirect::redirect_unauthorized;
use crate::state::{AppState, SharedState};
use crate::upload::UploadStore;

pub fn build_app(
    products: Arc<dyn ProductStore>,
    users: Arc<dyn UserStore>,
    config: Config,
) -> Router {
    build_app_with_clock(products, users, config, Arc::new(SystemClock))
}

/// Router assembly with an explicit clock, so tests can pin time.
pub fn build_app_with_clock(
    products: Arc<dyn ProductStore>,
    users: Arc<dyn UserStore>,
    config: Config,
    clock: Arc<dyn Clock>,
) -> Router {
    let uploads = UploadStore::new(config.uploads_dir.clone());
    let uploads_dir = config.uploads_dir.clone();
    let max_body_size = config.max_body_size;

    let catalog = ProductLifecycle::new(products.clone(), uploads, clock.clone());
    let registration = Registration::new(users.clone(), clock);

    let state: SharedState = Arc::new(AppState {
        config,
        products,
        users,
        catalog,
        registration,
    });

    // Everything server-rendered is a browser route: 401s become a
    // redirect to the login page.
    let pages = Router::new()
        .merge(views::view_routes())
        .merge(routes::form_routes())
        .layer(axum::middleware::from_fn(redirect_unauthorized))
        .layer(DefaultBodyLimit::max(max_body_size));

    Router::new()
        .merge(pages)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .nest_service("/static", ServeDir::new("static"))
        .route("/health", axum::routing::get(health))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
