use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::state::AppState;

/// The browser's backend session cookie as `name=value`, if it sent one.
/// Never rejects: a missing cookie just means "signed out".
#[derive(Debug, Clone, Default)]
pub struct BackendSession(pub Option<String>);

impl FromRequestParts<AppState> for BackendSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let name = &state.config.backend.session_cookie;
        Ok(BackendSession(
            get_cookie_value(parts, name).map(|value| format!("{}={}", name, value)),
        ))
    }
}

fn get_cookie_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .map(|s| s.trim())
        .find_map(|cookie| {
            let mut split = cookie.splitn(2, '=');
            let key = split.next()?.trim();
            let val = split.next()?.trim();
            if key == name && !val.is_empty() {
                Some(val)
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(cookie: &str) -> Parts {
        let (parts, _) = Request::builder()
            .header(header::COOKIE, cookie)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn finds_named_cookie_among_others() {
        let parts = parts("theme=dark; session_token=abc123; lang=en");
        assert_eq!(get_cookie_value(&parts, "session_token"), Some("abc123"));
    }

    #[test]
    fn empty_cookie_counts_as_missing() {
        let parts = parts("session_token=");
        assert_eq!(get_cookie_value(&parts, "session_token"), None);
    }
}
