use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use super::{ConfirmForm, ConfirmTemplate};
use crate::console::donations::{DonationInput, DELETE_DONATION_PROMPT};
use crate::console::supporters::{SupporterInput, DELETE_SUPPORTER_PROMPT};
use crate::console::Console;
use crate::extractors::BackendSession;
use crate::policy::{RoleRequirement, RANK_EDITOR};
use crate::routes::home::finish;
use crate::state::AppState;
use crate::view::ViewState;

const REQUIREMENT: RoleRequirement = RoleRequirement::MinRank(RANK_EDITOR);

#[derive(Template)]
#[template(path = "pages/admin.html")]
pub struct AdminTemplate<'a> {
    pub prefix: &'a str,
    pub view: &'a ViewState,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    pub edit_donation: Option<u64>,
    pub edit_supporter: Option<u64>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_page))
        .route("/admin/donations", post(submit_donation))
        .route(
            "/admin/donations/{id}/delete",
            get(confirm_delete_donation).post(delete_donation),
        )
        .route("/admin/supporters", post(submit_supporter))
        .route(
            "/admin/supporters/{id}/delete",
            get(confirm_delete_supporter).post(delete_supporter),
        )
}

/// Editor guard for every admin page. On success the sign-out control is
/// refreshed too.
async fn guarded(console: &mut Console<'_>, view: &mut ViewState) -> bool {
    let current = console.link("/admin");
    if !console.redirect_unauthorized(view, &REQUIREMENT, &current).await {
        return false;
    }
    console.update_auth_ui(view).await;
    true
}

fn render(state: &AppState, view: &ViewState, cookies: &[String]) -> Response {
    finish(view, cookies, || AdminTemplate {
        prefix: &state.config.console.hosting_prefix,
        view,
    })
}

/// GET /admin
async fn admin_page(
    State(state): State<AppState>,
    session: BackendSession,
    Query(query): Query<AdminQuery>,
) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();

    if guarded(&mut console, &mut view).await {
        console.load_admin_tables(&mut view).await;
        if let Some(id) = query.edit_donation {
            console.edit_donation(&mut view, id);
        }
        if let Some(id) = query.edit_supporter {
            console.edit_supporter(&mut view, id);
        }
    }

    render(&state, &view, console.relayed_cookies())
}

/// POST /admin/donations
async fn submit_donation(
    State(state): State<AppState>,
    session: BackendSession,
    Form(input): Form<DonationInput>,
) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();

    if guarded(&mut console, &mut view).await {
        console.submit_donation(&mut view, input).await;
        if !view.donations.is_loaded() {
            console.load_admin_tables(&mut view).await;
        }
    }

    render(&state, &view, console.relayed_cookies())
}

/// POST /admin/supporters
async fn submit_supporter(
    State(state): State<AppState>,
    session: BackendSession,
    Form(input): Form<SupporterInput>,
) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();

    if guarded(&mut console, &mut view).await {
        console.submit_supporter(&mut view, input).await;
        if !view.donations.is_loaded() {
            console.load_admin_tables(&mut view).await;
        }
    }

    render(&state, &view, console.relayed_cookies())
}

/// GET /admin/donations/{id}/delete
async fn confirm_delete_donation(
    State(state): State<AppState>,
    session: BackendSession,
    Path(id): Path<u64>,
) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();
    guarded(&mut console, &mut view).await;

    let prefix = &state.config.console.hosting_prefix;
    finish(&view, console.relayed_cookies(), || ConfirmTemplate {
        prefix,
        view: &view,
        question: DELETE_DONATION_PROMPT,
        action: state.config.console.link(&format!("/admin/donations/{}/delete", id)),
        back: state.config.console.link("/admin"),
    })
}

/// POST /admin/donations/{id}/delete
async fn delete_donation(
    State(state): State<AppState>,
    session: BackendSession,
    Path(id): Path<u64>,
    Form(form): Form<ConfirmForm>,
) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();

    if guarded(&mut console, &mut view).await {
        let answer = form.answer();
        console
            .delete_donation(&mut view, id, &|_: &str| answer)
            .await;
        if !view.donations.is_loaded() {
            console.load_admin_tables(&mut view).await;
        }
    }

    render(&state, &view, console.relayed_cookies())
}

/// GET /admin/supporters/{id}/delete
async fn confirm_delete_supporter(
    State(state): State<AppState>,
    session: BackendSession,
    Path(id): Path<u64>,
) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();
    guarded(&mut console, &mut view).await;

    let prefix = &state.config.console.hosting_prefix;
    finish(&view, console.relayed_cookies(), || ConfirmTemplate {
        prefix,
        view: &view,
        question: DELETE_SUPPORTER_PROMPT,
        action: state.config.console.link(&format!("/admin/supporters/{}/delete", id)),
        back: state.config.console.link("/admin"),
    })
}

/// POST /admin/supporters/{id}/delete
async fn delete_supporter(
    State(state): State<AppState>,
    session: BackendSession,
    Path(id): Path<u64>,
    Form(form): Form<ConfirmForm>,
) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();

    if guarded(&mut console, &mut view).await {
        let answer = form.answer();
        console
            .delete_supporter(&mut view, id, &|_: &str| answer)
            .await;
        if !view.donations.is_loaded() {
            console.load_admin_tables(&mut view).await;
        }
    }

    render(&state, &view, console.relayed_cookies())
}
