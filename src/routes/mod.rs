use askama::Template;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::view::ViewState;

pub mod account;
pub mod admin;
pub mod assets;
pub mod auth;
pub mod home;
pub mod users;

/// Full console router, mounted under the configured hosting prefix.
pub fn router(state: AppState) -> Router {
    let prefix = state.config.console.hosting_prefix.clone();

    let console = Router::new()
        .route("/", get(home::index))
        .route("/assets/{*path}", get(assets::serve))
        .merge(auth::router())
        .merge(admin::router())
        .merge(users::router())
        .merge(account::router());

    let app = if prefix.is_empty() {
        console
    } else {
        Router::new().nest(&prefix, console)
    };

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Stand-in for a confirmation dialog: the question plus a form that posts
/// `confirm=yes` back to `action`.
#[derive(Template)]
#[template(path = "pages/confirm.html")]
pub struct ConfirmTemplate<'a> {
    pub prefix: &'a str,
    pub view: &'a ViewState,
    pub question: &'a str,
    pub action: String,
    pub back: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfirmForm {
    #[serde(default)]
    pub confirm: String,
}

impl ConfirmForm {
    pub fn answer(&self) -> bool {
        self.confirm == "yes"
    }
}
