use askama::Template;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;

use super::{ConfirmForm, ConfirmTemplate};
use crate::console::invites::restore_invites;
use crate::console::users::DELETE_USER_PROMPT;
use crate::extractors::BackendSession;
use crate::policy::{RoleRequirement, RANK_ADMIN, ROLE_SUPERADMIN};
use crate::routes::home::finish;
use crate::state::AppState;
use crate::view::ViewState;

const USERS_REQUIREMENT: RoleRequirement = RoleRequirement::MinRank(RANK_ADMIN);
const INVITES_REQUIREMENT: RoleRequirement = RoleRequirement::Exact(ROLE_SUPERADMIN);

#[derive(Template)]
#[template(path = "pages/users.html")]
pub struct UsersTemplate<'a> {
    pub prefix: &'a str,
    pub view: &'a ViewState,
}

#[derive(Template)]
#[template(path = "pages/invites.html")]
pub struct InvitesTemplate<'a> {
    pub prefix: &'a str,
    pub view: &'a ViewState,
}

#[derive(Debug, Default, Deserialize)]
pub struct InviteForm {
    #[serde(default)]
    pub role: String,
    /// Invites already shown on the page, as JSON
    #[serde(default)]
    pub issued: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(users_page))
        .route(
            "/admin/users/{id}/delete",
            get(confirm_delete_user).post(delete_user),
        )
        .route("/admin/invites", get(invites_page).post(create_invite))
}

/// GET /admin/users
async fn users_page(State(state): State<AppState>, session: BackendSession) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();
    let current = console.link("/admin/users");

    if console
        .redirect_unauthorized(&mut view, &USERS_REQUIREMENT, &current)
        .await
    {
        console.update_auth_ui(&mut view).await;
        console.load_users(&mut view).await;
    }

    finish(&view, console.relayed_cookies(), || UsersTemplate {
        prefix: &state.config.console.hosting_prefix,
        view: &view,
    })
}

/// GET /admin/users/{id}/delete
async fn confirm_delete_user(
    State(state): State<AppState>,
    session: BackendSession,
    Path(id): Path<u64>,
) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();
    let current = console.link("/admin/users");

    if console
        .redirect_unauthorized(&mut view, &USERS_REQUIREMENT, &current)
        .await
    {
        console.update_auth_ui(&mut view).await;
    }

    let prefix = &state.config.console.hosting_prefix;
    finish(&view, console.relayed_cookies(), || ConfirmTemplate {
        prefix,
        view: &view,
        question: DELETE_USER_PROMPT,
        action: state.config.console.link(&format!("/admin/users/{}/delete", id)),
        back: current.clone(),
    })
}

/// POST /admin/users/{id}/delete
async fn delete_user(
    State(state): State<AppState>,
    session: BackendSession,
    Path(id): Path<u64>,
    Form(form): Form<ConfirmForm>,
) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();
    let current = console.link("/admin/users");

    if console
        .redirect_unauthorized(&mut view, &USERS_REQUIREMENT, &current)
        .await
    {
        console.update_auth_ui(&mut view).await;
        let answer = form.answer();
        console.delete_user(&mut view, id, &|_: &str| answer).await;
        if !view.users.is_loaded() {
            console.load_users(&mut view).await;
        }
    }

    finish(&view, console.relayed_cookies(), || UsersTemplate {
        prefix: &state.config.console.hosting_prefix,
        view: &view,
    })
}

/// GET /admin/invites
async fn invites_page(State(state): State<AppState>, session: BackendSession) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();
    let current = console.link("/admin/invites");

    if console
        .redirect_unauthorized(&mut view, &INVITES_REQUIREMENT, &current)
        .await
    {
        console.update_auth_ui(&mut view).await;
    }

    finish(&view, console.relayed_cookies(), || InvitesTemplate {
        prefix: &state.config.console.hosting_prefix,
        view: &view,
    })
}

/// POST /admin/invites
async fn create_invite(
    State(state): State<AppState>,
    session: BackendSession,
    Form(form): Form<InviteForm>,
) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();
    let current = console.link("/admin/invites");

    if console
        .redirect_unauthorized(&mut view, &INVITES_REQUIREMENT, &current)
        .await
    {
        console.update_auth_ui(&mut view).await;
        restore_invites(&mut view, &form.issued);
        console.invite(&mut view, &form.role).await;
    }

    finish(&view, console.relayed_cookies(), || InvitesTemplate {
        prefix: &state.config.console.hosting_prefix,
        view: &view,
    })
}
