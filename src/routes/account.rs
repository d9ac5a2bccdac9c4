use askama::Template;
use axum::extract::State;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::extractors::BackendSession;
use crate::policy::RoleRequirement;
use crate::routes::home::finish;
use crate::state::AppState;
use crate::view::ViewState;

/// Any signed-in user may manage their own account.
const REQUIREMENT: RoleRequirement = RoleRequirement::MinRank(0);

#[derive(Template)]
#[template(path = "pages/account.html")]
pub struct AccountTemplate<'a> {
    pub prefix: &'a str,
    pub view: &'a ViewState,
}

#[derive(Debug, Default, Deserialize)]
pub struct EmailForm {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PasswordForm {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/account", get(account_page))
        .route("/account/email", post(update_email))
        .route("/account/password", post(update_password))
}

async fn account_page(State(state): State<AppState>, session: BackendSession) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();
    let current = console.link("/account");

    if console
        .redirect_unauthorized(&mut view, &REQUIREMENT, &current)
        .await
    {
        console.update_auth_ui(&mut view).await;
    }

    finish(&view, console.relayed_cookies(), || AccountTemplate {
        prefix: &state.config.console.hosting_prefix,
        view: &view,
    })
}

async fn update_email(
    State(state): State<AppState>,
    session: BackendSession,
    Form(form): Form<EmailForm>,
) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();
    let current = console.link("/account");

    if console
        .redirect_unauthorized(&mut view, &REQUIREMENT, &current)
        .await
    {
        console.update_auth_ui(&mut view).await;
        console.update_email(&mut view, &form.email).await;
    }

    finish(&view, console.relayed_cookies(), || AccountTemplate {
        prefix: &state.config.console.hosting_prefix,
        view: &view,
    })
}

async fn update_password(
    State(state): State<AppState>,
    session: BackendSession,
    Form(form): Form<PasswordForm>,
) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();
    let current = console.link("/account");

    if console
        .redirect_unauthorized(&mut view, &REQUIREMENT, &current)
        .await
    {
        console.update_auth_ui(&mut view).await;
        console
            .update_password(&mut view, &form.password, &form.confirm_password)
            .await;
    }

    finish(&view, console.relayed_cookies(), || AccountTemplate {
        prefix: &state.config.console.hosting_prefix,
        view: &view,
    })
}
