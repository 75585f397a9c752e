//! Scripted transport for tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use serde_json::Value;

use super::{ApiError, ApiRequest, ApiResponse, Method, Result, Transport};

type Route = (Method, String);

/// Answers requests from a fixed route table and records every call.
/// Unknown routes answer 404.
#[derive(Default)]
pub struct FakeTransport {
    routes: HashMap<Route, std::result::Result<ApiResponse, String>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.respond_text(method, path, status, &body.to_string())
    }

    pub fn respond_text(mut self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            (method, path.to_string()),
            Ok(ApiResponse {
                status,
                body: body.to_string(),
            }),
        );
        self
    }

    pub fn fail(mut self, method: Method, path: &str, reason: &str) -> Self {
        self.routes
            .insert((method, path.to_string()), Err(reason.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }
}

impl Transport for FakeTransport {
    fn execute(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse>> + Send {
        let outcome = match self.routes.get(&(request.method, request.path.clone())) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(reason)) => Err(ApiError::Transport(reason.clone())),
            None => Ok(ApiResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        };
        self.calls.lock().unwrap().push(request);
        async move { outcome }
    }
}
