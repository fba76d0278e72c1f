use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::flash::{self, Flash};
use crate::forms::product::RawProductForm;
use crate::forms::ValidationErrors;
use crate::models::Product;
use crate::state::SharedState;

/// Shared between the GET pages and the POST handlers, which re-render it
/// with field errors on validation failure.
#[derive(Template)]
#[template(path = "admin/product_form.html")]
pub(crate) struct ProductFormTemplate {
    pub title: String,
    pub action: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub current_photo: String,
    pub errors: ValidationErrors,
    pub flashes: Vec<Flash>,
}

impl ProductFormTemplate {
    pub fn for_create() -> Self {
        Self {
            title: "Add a product".to_string(),
            action: "/admin/products/new".to_string(),
            name: String::new(),
            description: String::new(),
            price: String::new(),
            current_photo: String::new(),
            errors: ValidationErrors::default(),
            flashes: Vec::new(),
        }
    }

    pub fn for_update(product: &Product) -> Self {
        Self {
            title: "Edit product".to_string(),
            action: format!("/admin/products/{}/edit", product.id),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            current_photo: product.photo.clone().unwrap_or_default(),
            errors: ValidationErrors::default(),
            flashes: Vec::new(),
        }
    }

    /// Refill the inputs from a rejected submission.
    pub fn with_submission(mut self, raw: &RawProductForm, errors: ValidationErrors) -> Self {
        self.name = raw.name.clone();
        self.description = raw.description.clone();
        self.price = raw.price.clone();
        self.errors = errors;
        self
    }

    pub fn page(self) -> Html<String> {
        Html(self.render().unwrap_or_default())
    }
}

pub async fn new_product_page(
    auth: AuthUser,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;

    let (jar, flashes) = flash::take(jar);
    let mut template = ProductFormTemplate::for_create();
    template.flashes = flashes;
    Ok((jar, template.page()))
}

pub async fn edit_product_page(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;

    let product = state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let (jar, flashes) = flash::take(jar);
    let mut template = ProductFormTemplate::for_update(&product);
    template.flashes = flashes;
    Ok((jar, template.page()))
}
