use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum_extra::extract::CookieJar;

use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::flash::{self, Flash};
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    products: Vec<ProductRow>,
    flashes: Vec<Flash>,
}

struct ProductRow {
    id: String,
    name: String,
    price: String,
    photo: String,
    updated_at: String,
}

pub async fn index(
    auth: AuthUser,
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;

    let products = state
        .products
        .list_active()
        .await?
        .into_iter()
        .map(|p| ProductRow {
            id: p.id.to_string(),
            name: p.name,
            price: p.price.to_string(),
            photo: p.photo.unwrap_or_default(),
            updated_at: p.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();

    let (jar, flashes) = flash::take(jar);
    let template = DashboardTemplate { products, flashes };
    Ok((jar, Html(template.render().unwrap_or_default())))
}
