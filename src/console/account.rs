use super::{log_transport, Console};
use crate::api::ApiRequest;
use crate::models::AccountPatch;
use crate::view::ViewState;

impl Console<'_> {
    /// Change the signed-in user's email. The backend's answer is shown as-is.
    pub async fn update_email(&mut self, view: &mut ViewState, email: &str) {
        let email = email.trim();
        if email.is_empty() {
            view.alert("Email cannot be empty");
            return;
        }

        let patch = AccountPatch {
            email: Some(email),
            password: None,
        };
        self.patch_me(view, &patch, "Failed to update email").await;
    }

    pub async fn update_password(&mut self, view: &mut ViewState, password: &str, confirm: &str) {
        if password != confirm {
            view.alert("Passwords must match");
            return;
        }

        let patch = AccountPatch {
            email: None,
            password: Some(password),
        };
        self.patch_me(view, &patch, "Failed to update password").await;
    }

    async fn patch_me(&mut self, view: &mut ViewState, patch: &AccountPatch<'_>, failure: &str) {
        let result = match ApiRequest::patch("/users/me").json(patch) {
            Ok(request) => self.send(request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(res) => view.alert(res.text()),
            Err(e) => {
                log_transport("Account update", &e);
                view.alert(failure);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::RecordingBackend;
    use crate::config::Config;
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn empty_email_sends_nothing() {
        let backend = RecordingBackend::new();
        let config = Config::default();
        let mut console = Console::new(&backend, &config, None);
        let mut view = ViewState::new();

        console.update_email(&mut view, "  ").await;

        assert!(backend.calls().is_empty());
        assert_eq!(view.alerts, vec!["Email cannot be empty".to_string()]);
    }

    #[tokio::test]
    async fn mismatched_passwords_send_nothing() {
        let backend = RecordingBackend::new();
        let config = Config::default();
        let mut console = Console::new(&backend, &config, None);
        let mut view = ViewState::new();

        console.update_password(&mut view, "hunter2", "hunter3").await;

        assert!(backend.calls().is_empty());
        assert_eq!(view.alerts, vec!["Passwords must match".to_string()]);
    }

    #[tokio::test]
    async fn email_patch_alerts_response_text() {
        let backend = RecordingBackend::new().respond(
            StatusCode::OK,
            r#"{"id":1,"email":"new@example.org","role":"admin","role_rank":3}"#,
        );
        let config = Config::default();
        let mut console = Console::new(&backend, &config, Some("session_token=t".into()));
        let mut view = ViewState::new();

        console.update_email(&mut view, " new@example.org ").await;

        let requests = backend.requests();
        assert_eq!(requests[0].method, Method::PATCH);
        assert_eq!(requests[0].path, "/users/me");
        assert_eq!(
            requests[0].body,
            Some(serde_json::json!({ "email": "new@example.org" }))
        );
        assert!(view.alerts[0].contains("new@example.org"));
    }

    #[tokio::test]
    async fn password_patch_alerts_even_on_error_status() {
        let backend = RecordingBackend::new().respond(StatusCode::UNAUTHORIZED, "Not logged in");
        let config = Config::default();
        let mut console = Console::new(&backend, &config, None);
        let mut view = ViewState::new();

        console.update_password(&mut view, "pw", "pw").await;

        assert_eq!(
            backend.requests()[0].body,
            Some(serde_json::json!({ "password": "pw" }))
        );
        assert_eq!(view.alerts, vec!["Not logged in".to_string()]);
    }

    #[tokio::test]
    async fn transport_failure_alerts_fixed_message() {
        let backend = RecordingBackend::new().fail();
        let config = Config::default();
        let mut console = Console::new(&backend, &config, None);
        let mut view = ViewState::new();

        console.update_password(&mut view, "pw", "pw").await;

        assert_eq!(view.alerts, vec!["Failed to update password".to_string()]);
    }
}
