use async_trait::async_trait;
use axum::http::header;

use super::{ApiError, ApiRequest, ApiResponse, ApiResult, Backend};

/// `Backend` over HTTP. No retries and no request timeout.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        tracing::debug!("{} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method, &url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(cookie) = request.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        if let Some(body) = request.body {
            builder = builder.body(body.to_string());
        }

        let resp = builder.send().await.map_err(|e| {
            if e.is_connect() {
                ApiError::Unreachable(url.clone())
            } else {
                ApiError::Http(e)
            }
        })?;

        let status = resp.status();
        let set_cookies = resp
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(String::from)
            .collect();
        let body = resp.text().await?;

        tracing::debug!("{} -> {}", url, status);

        Ok(ApiResponse {
            status,
            body,
            set_cookies,
        })
    }
}
