use askama::Template;
use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::extractors::BackendSession;
use crate::routes::home::finish;
use crate::state::AppState;
use crate::view::ViewState;

#[derive(Template)]
#[template(path = "pages/login.html")]
pub struct LoginTemplate<'a> {
    pub prefix: &'a str,
    pub view: &'a ViewState,
    pub next: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
    pub notice: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub invite: String,
    #[serde(default)]
    pub next: String,
}

impl CredentialsForm {
    fn next(&self) -> Option<&str> {
        Some(self.next.as_str()).filter(|n| !n.is_empty())
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page))
        .route("/login/signin", post(signin))
        .route("/login/signup", post(signup))
        .route("/login/signout", post(signout))
        .route("/login/whoami", post(whoami))
}

/// GET /login shows sign-in controls or the sign-out control, depending on the session
async fn login_page(
    State(state): State<AppState>,
    session: BackendSession,
    Query(query): Query<LoginQuery>,
) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();
    if let Some(notice) = query.notice {
        view.alert(notice);
    }

    console.update_auth_ui(&mut view).await;

    let next = query.next.unwrap_or_default();
    finish(&view, console.relayed_cookies(), || LoginTemplate {
        prefix: &state.config.console.hosting_prefix,
        view: &view,
        next: &next,
    })
}

/// POST /login/signin
async fn signin(
    State(state): State<AppState>,
    session: BackendSession,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();

    console
        .signin(&mut view, &form.email, &form.password, form.next())
        .await;
    if view.redirect.is_none() {
        console.update_auth_ui(&mut view).await;
    }

    finish(&view, console.relayed_cookies(), || LoginTemplate {
        prefix: &state.config.console.hosting_prefix,
        view: &view,
        next: &form.next,
    })
}

/// POST /login/signup
async fn signup(
    State(state): State<AppState>,
    session: BackendSession,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();

    console
        .signup(
            &mut view,
            &form.email,
            &form.password,
            &form.invite,
            form.next(),
        )
        .await;
    if view.redirect.is_none() {
        console.update_auth_ui(&mut view).await;
    }

    finish(&view, console.relayed_cookies(), || LoginTemplate {
        prefix: &state.config.console.hosting_prefix,
        view: &view,
        next: &form.next,
    })
}

/// POST /login/signout
async fn signout(State(state): State<AppState>, session: BackendSession) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();

    console.signout(&mut view).await;

    finish(&view, console.relayed_cookies(), || LoginTemplate {
        prefix: &state.config.console.hosting_prefix,
        view: &view,
        next: "",
    })
}

/// POST /login/whoami
async fn whoami(State(state): State<AppState>, session: BackendSession) -> Response {
    let mut console = state.console(session);
    let mut view = ViewState::new();

    console.whoami(&mut view).await;
    console.update_auth_ui(&mut view).await;

    finish(&view, console.relayed_cookies(), || LoginTemplate {
        prefix: &state.config.console.hosting_prefix,
        view: &view,
        next: "",
    })
}
