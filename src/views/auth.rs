use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use crate::auth::extractor::session_user;
use crate::flash::{self, Flash};
use crate::forms::ValidationErrors;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "auth/login.html")]
pub(crate) struct LoginTemplate {
    pub email: String,
    pub error: String,
    pub flashes: Vec<Flash>,
}

impl LoginTemplate {
    pub fn page(self) -> Html<String> {
        Html(self.render().unwrap_or_default())
    }
}

#[derive(Template)]
#[template(path = "auth/register.html")]
pub(crate) struct RegisterTemplate {
    pub email: String,
    pub errors: ValidationErrors,
    pub flashes: Vec<Flash>,
}

impl RegisterTemplate {
    pub fn empty() -> Self {
        Self {
            email: String::new(),
            errors: ValidationErrors::default(),
            flashes: Vec::new(),
        }
    }

    pub fn page(self) -> Html<String> {
        Html(self.render().unwrap_or_default())
    }
}

pub async fn login_page(State(state): State<SharedState>, jar: CookieJar) -> Response {
    // Already signed in: straight to the back-office.
    if session_user(&jar, &state).is_some() {
        return Redirect::to("/dashboard").into_response();
    }

    let (jar, flashes) = flash::take(jar);
    let template = LoginTemplate {
        email: String::new(),
        error: String::new(),
        flashes,
    };
    (jar, template.page()).into_response()
}

pub async fn register_page(State(state): State<SharedState>, jar: CookieJar) -> Response {
    // Authenticated callers may not register again.
    if session_user(&jar, &state).is_some() {
        let jar = flash::push(
            jar,
            flash::Level::Warning,
            "You are signed in, registration is not allowed.",
        );
        return (jar, Redirect::to("/")).into_response();
    }

    let (jar, flashes) = flash::take(jar);
    let mut template = RegisterTemplate::empty();
    template.flashes = flashes;
    (jar, template.page()).into_response()
}
