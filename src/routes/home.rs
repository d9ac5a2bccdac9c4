use askama::Template;
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};

use crate::error::AppError;
use crate::state::AppState;
use crate::view::ViewState;

/// Wrapper to render askama templates as axum responses
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => AppError::from(e).into_response(),
        }
    }
}

/// Turn a finished view into a response: follow its redirect (carrying any
/// alerts as a `notice`) or render `page`, and relay backend cookies either way.
pub fn finish<T, F>(view: &ViewState, cookies: &[String], page: F) -> Response
where
    T: Template,
    F: FnOnce() -> T,
{
    let mut response = match &view.redirect {
        Some(location) => Redirect::to(&with_notice(location, &view.alerts)).into_response(),
        None => Html(page()).into_response(),
    };

    for cookie in cookies {
        match HeaderValue::from_str(cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!("Dropping unrelayable Set-Cookie: {}", e),
        }
    }

    response
}

fn with_notice(location: &str, alerts: &[String]) -> String {
    let notice = alerts
        .iter()
        .filter(|a| !a.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");
    if notice.is_empty() {
        return location.to_string();
    }

    let encoded: String = url::form_urlencoded::byte_serialize(notice.as_bytes()).collect();
    let separator = if location.contains('?') { '&' } else { '?' };
    format!("{}{}notice={}", location, separator, encoded)
}

pub async fn index(State(state): State<AppState>) -> Response {
    Redirect::to(&state.config.console.link("/admin")).into_response()
}
