use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::flash::{self, Level};
use crate::forms::product::RawProductForm;
use crate::lifecycle::SaveOutcome;
use crate::state::SharedState;
use crate::views::products::ProductFormTemplate;

pub async fn create(
    State(state): State<SharedState>,
    auth: AuthUser,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    auth.require_admin()?;

    let raw = RawProductForm::bind(&mut multipart).await?;
    match raw.validate() {
        Ok(form) => {
            let outcome = state.catalog.create(form).await?;
            let jar = flash_outcome(jar, "The product is now online!", &outcome);
            Ok((jar, Redirect::to("/dashboard")).into_response())
        }
        Err((raw, errors)) => {
            let template = ProductFormTemplate::for_create().with_submission(&raw, errors);
            Ok(template.page().into_response())
        }
    }
}

pub async fn update(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    auth.require_admin()?;

    let product = state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let raw = RawProductForm::bind(&mut multipart).await?;
    match raw.validate() {
        Ok(form) => {
            let outcome = state.catalog.update(product, form).await?;
            let jar = flash_outcome(jar, "The changes have been saved.", &outcome);
            Ok((jar, Redirect::to("/dashboard")).into_response())
        }
        Err((raw, errors)) => {
            let template = ProductFormTemplate::for_update(&product).with_submission(&raw, errors);
            Ok(template.page().into_response())
        }
    }
}

pub async fn archive(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    auth.require_admin()?;

    let product = state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    state.catalog.archive(product).await?;

    let jar = flash::push(jar, Level::Success, "The product has been archived.");
    Ok((jar, Redirect::to("/dashboard")))
}

fn flash_outcome(jar: CookieJar, success: &str, outcome: &SaveOutcome) -> CookieJar {
    let jar = flash::push(jar, Level::Success, success);
    match &outcome.upload_warning {
        Some(warning) => flash::push(jar, Level::Warning, warning.clone()),
        None => jar,
    }
}
