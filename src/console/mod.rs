//! Console controllers.
//!
//! A [`Console`] is built per incoming page request. It carries the forwarded
//! backend session and runs every action as a sequence of backend calls whose
//! outcome lands in a [`ViewState`](crate::view::ViewState). Controllers never
//! return errors: failures become alerts, status text or table rows.

use crate::api::{ApiError, ApiRequest, ApiResponse, ApiResult, Backend};
use crate::config::Config;

pub mod account;
pub mod auth;
pub mod donations;
pub mod invites;
pub mod supporters;
pub mod table;
pub mod users;

pub use table::TableSpec;

/// Answers a confirmation dialog before a destructive call.
pub trait Confirm: Send + Sync {
    fn confirm(&self, question: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, question: &str) -> bool {
        self(question)
    }
}

pub struct Console<'a> {
    backend: &'a dyn Backend,
    config: &'a Config,
    /// `name=value` of the backend session cookie, if the browser sent one
    session: Option<String>,
    relayed: Vec<String>,
}

impl<'a> Console<'a> {
    pub fn new(backend: &'a dyn Backend, config: &'a Config, session: Option<String>) -> Self {
        Self {
            backend,
            config,
            session,
            relayed: Vec::new(),
        }
    }

    #[cfg(test)]
    fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    /// `Set-Cookie` values the backend sent during this request.
    pub fn relayed_cookies(&self) -> &[String] {
        &self.relayed
    }

    pub fn link(&self, path: &str) -> String {
        self.config.console.link(path)
    }

    async fn send(&mut self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let response = self
            .backend
            .send(request.cookie(self.session.clone()))
            .await?;

        for set_cookie in &response.set_cookies {
            self.absorb_cookie(set_cookie);
            self.relayed.push(set_cookie.clone());
        }

        Ok(response)
    }

    /// Track session changes so later calls in the same request see them.
    fn absorb_cookie(&mut self, set_cookie: &str) {
        let Some((name, value)) = set_cookie
            .split(';')
            .next()
            .and_then(|pair| pair.trim().split_once('='))
        else {
            return;
        };
        if name.trim() != self.config.backend.session_cookie {
            return;
        }

        let expired = set_cookie
            .split(';')
            .any(|attr| attr.trim().eq_ignore_ascii_case("max-age=0"));
        self.session = if value.is_empty() || expired {
            None
        } else {
            Some(format!("{}={}", name.trim(), value.trim()))
        };
    }
}

fn log_transport(action: &str, err: &ApiError) {
    tracing::error!("{} failed: {}", action, err);
}
