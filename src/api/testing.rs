// In-memory backend for controller tests: scripted responses, recorded requests
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::http::{Method, StatusCode};

use super::{ApiError, ApiRequest, ApiResponse, ApiResult, Backend};

pub enum Scripted {
    Respond(ApiResponse),
    Fail,
}

#[derive(Default)]
pub struct RecordingBackend {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: StatusCode, body: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Respond(ApiResponse::new(status, body)));
        self
    }

    pub fn respond_with_cookie(self, status: StatusCode, body: &str, cookie: &str) -> Self {
        let mut response = ApiResponse::new(status, body);
        response.set_cookies.push(cookie.to_string());
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Respond(response));
        self
    }

    pub fn fail(self) -> Self {
        self.script.lock().unwrap().push_back(Scripted::Fail);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `(method, path)` of every recorded call, in order
    pub fn calls(&self) -> Vec<(Method, String)> {
        self.requests()
            .into_iter()
            .map(|r| (r.method, r.path))
            .collect()
    }
}

#[async_trait]
impl Backend for RecordingBackend {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail) => Err(ApiError::Unreachable("connection refused".into())),
            None => panic!("RecordingBackend: no scripted response left"),
        }
    }
}
