use super::{log_transport, Console};
use crate::api::ApiRequest;
use crate::models::{Credentials, Me, SignupRequest};
use crate::policy::RoleRequirement;
use crate::view::{AuthControls, ViewState, CONNECTION_ERROR_TEXT};

impl Console<'_> {
    /// Create an account from an invite, then sign straight in.
    pub async fn signup(
        &mut self,
        view: &mut ViewState,
        email: &str,
        password: &str,
        invite: &str,
        next: Option<&str>,
    ) {
        let body = SignupRequest {
            email,
            password,
            invite: invite.trim(),
        };
        let result = match ApiRequest::post("/users/auth/signup").json(&body) {
            Ok(request) => self.send(request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(res) if res.is_ok() => {
                tracing::info!("Signed up {}", email);
                self.signin(view, email, password, next).await;
            }
            Ok(res) => view.alert(res.text()),
            Err(e) => {
                log_transport("Sign up", &e);
                view.alert(CONNECTION_ERROR_TEXT);
            }
        }
    }

    /// On success the backend's session cookie is relayed and the view
    /// redirects to `next`, or to the admin page.
    pub async fn signin(
        &mut self,
        view: &mut ViewState,
        email: &str,
        password: &str,
        next: Option<&str>,
    ) {
        let body = Credentials { email, password };
        let result = match ApiRequest::post("/users/auth/signin").json(&body) {
            Ok(request) => self.send(request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(res) if res.is_ok() => {
                let target = self.safe_next(next);
                view.redirect_to(target);
            }
            Ok(res) => view.alert(res.text()),
            Err(e) => {
                log_transport("Sign in", &e);
                view.alert(CONNECTION_ERROR_TEXT);
            }
        }
    }

    pub async fn signout(&mut self, view: &mut ViewState) {
        let result = self.send(ApiRequest::post("/users/auth/signout")).await;
        self.update_auth_ui(view).await;

        match result {
            Ok(res) => view.alert(res.text()),
            Err(e) => {
                log_transport("Sign out", &e);
                view.alert(CONNECTION_ERROR_TEXT);
            }
        }
    }

    /// Show whatever the backend says about the current session.
    pub async fn whoami(&mut self, view: &mut ViewState) {
        match self.send(ApiRequest::get("/users/me")).await {
            Ok(res) => view.alert(res.text()),
            Err(e) => {
                log_transport("Who am I", &e);
                view.alert(CONNECTION_ERROR_TEXT);
            }
        }
    }

    /// Only a 200 from the validate endpoint counts as signed in.
    pub async fn update_auth_ui(&mut self, view: &mut ViewState) {
        let signed_in = match self.send(ApiRequest::get("/users/auth/validate")).await {
            Ok(res) => res.status == axum::http::StatusCode::OK,
            Err(e) => {
                log_transport("Session check", &e);
                false
            }
        };
        view.auth = AuthControls { signed_in };
    }

    /// Check the signed-in user against `requirement`.
    ///
    /// Returns `true` and records the user in the view when allowed. Otherwise
    /// alerts and sets a redirect to the login page that returns to
    /// `current_path` afterwards.
    pub async fn redirect_unauthorized(
        &mut self,
        view: &mut ViewState,
        requirement: &RoleRequirement,
        current_path: &str,
    ) -> bool {
        let me = match self.send(ApiRequest::get("/users/me")).await {
            Ok(res) if res.is_ok() => match res.json::<Me>() {
                Ok(me) => Some(me),
                Err(e) => {
                    log_transport("Current user", &e);
                    None
                }
            },
            Ok(_) => None,
            Err(e) => {
                log_transport("Current user", &e);
                None
            }
        };

        match me {
            Some(me) if requirement.is_met_by(&me) => {
                view.me = Some(me);
                true
            }
            other => {
                if let Some(me) = other {
                    tracing::warn!(
                        "{} ({}, rank {}) does not satisfy {}",
                        me.email,
                        me.role,
                        me.role_rank,
                        requirement
                    );
                }
                view.alert(requirement.denial());
                view.redirect_to(self.login_url(current_path));
                false
            }
        }
    }

    pub fn login_url(&self, return_to: &str) -> String {
        let next: String = url::form_urlencoded::byte_serialize(return_to.as_bytes()).collect();
        format!("{}?next={}", self.link("/login"), next)
    }

    /// `next` when it is a path on this site, the admin page otherwise.
    pub fn safe_next(&self, next: Option<&str>) -> String {
        match next {
            Some(path) if is_local_path(path) => path.to_string(),
            _ => self.link("/admin"),
        }
    }
}

/// Browsers read `\` as `/` in a Location, so `/\host` is as off-site as `//host`.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}
