use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;

use crate::auth::extractor::{session_user, SESSION_COOKIE};
use crate::auth::jwt::{encode_token, Claims};
use crate::auth::password;
use crate::error::AppError;
use crate::flash::{self, Level};
use crate::forms::{LoginForm, RegisterForm};
use crate::lifecycle::RegistrationError;
use crate::state::SharedState;
use crate::views::auth::{LoginTemplate, RegisterTemplate};

pub async fn register(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    // A signed-in caller cannot register a second account from the same
    // session; warn and send them home without touching the store.
    if session_user(&jar, &state).is_some() {
        let jar = flash::push(
            jar,
            Level::Warning,
            "You are signed in, registration is not allowed.",
        );
        return Ok((jar, Redirect::to("/")).into_response());
    }

    match state.registration.register(&form).await {
        Ok(_) => {
            let jar = flash::push(
                jar,
                Level::Success,
                "Your registration has been saved, you can now log in.",
            );
            Ok((jar, Redirect::to("/auth/login")).into_response())
        }
        Err(RegistrationError::Invalid(errors)) => {
            let template = RegisterTemplate {
                email: form.email,
                errors,
                flashes: Vec::new(),
            };
            Ok(template.page().into_response())
        }
        Err(RegistrationError::Fatal(err)) => Err(err),
    }
}

pub async fn login(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let email = form.email.trim().to_lowercase();

    let user = state.users.find_by_email(&email).await?;
    let valid = match &user {
        Some(user) => password::verify(&form.password, &user.password_hash)
            .map_err(AppError::Internal)?,
        None => false,
    };

    let Some(user) = user.filter(|_| valid) else {
        let template = LoginTemplate {
            email: form.email,
            error: "Invalid credentials".to_string(),
            flashes: Vec::new(),
        };
        return Ok(template.page().into_response());
    };

    let claims = Claims::new(user.id, user.email.clone(), user.roles.clone());
    let token = encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(8))
        .build();

    let target = if user.is_admin() { "/dashboard" } else { "/" };
    Ok((jar.add(cookie), Redirect::to(target)).into_response())
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let cleared = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    (cleared, Redirect::to("/"))
}
