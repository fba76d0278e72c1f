use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum_extra::extract::CookieJar;

use crate::auth::extractor::session_user;
use crate::flash::{self, Flash};
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    signed_in: bool,
    flashes: Vec<Flash>,
}

pub async fn index(State(state): State<SharedState>, jar: CookieJar) -> impl IntoResponse {
    let signed_in = session_user(&jar, &state).is_some();
    let (jar, flashes) = flash::take(jar);

    let template = HomeTemplate { signed_in, flashes };
    (jar, Html(template.render().unwrap_or_default()))
}
