//! REST client for the construction backend.
//!
//! `ApiClient` owns the request/response contract (status handling, JSON
//! decoding, resource paths). The actual round trip goes through a
//! [`Transport`], so the client can be driven by reqwest in the app and by a
//! scripted transport in tests.

mod http;
#[cfg(test)]
pub mod fake;

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::{
    Employee, EmployeeInput, HealthStatus, Material, MaterialInput, Project, ProjectInput,
    Resource, Work, WorkInput,
};

pub use http::HttpTransport;

/// Errors from API operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network unreachable, DNS, connection reset...
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-2xx response; the message is the response body text.
    #[error("{message}")]
    HttpStatus { status: u16, message: String },

    #[error("invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A single request, independent of the HTTP library carrying it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one HTTP round trip. No retry, no timeout.
pub trait Transport: Send + Sync + 'static {
    fn execute(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse>> + Send;
}

/// Client for the construction backend API.
pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        debug!(method = ?request.method, path = %request.path, "api request");
        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(ApiError::HttpStatus {
                status: response.status,
                message: response.body,
            });
        }
        Ok(response)
    }

    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<R> {
        let response = self
            .send(ApiRequest::new(Method::Get, path).with_query(query))
            .await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    pub async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let body = serde_json::to_value(body)?;
        let response = self
            .send(ApiRequest::new(Method::Post, path).with_body(body))
            .await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    pub async fn put<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let body = serde_json::to_value(body)?;
        let response = self
            .send(ApiRequest::new(Method::Put, path).with_body(body))
            .await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Any 2xx is success, including 204 and an empty body.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(ApiRequest::new(Method::Delete, path)).await?;
        Ok(())
    }

    // Generic resource operations
    pub async fn list<R: Resource>(&self, query: Vec<(String, String)>) -> Result<Vec<R>> {
        self.get(R::PATH, query).await
    }

    pub async fn create<R: Resource>(&self, input: &R::Input) -> Result<R> {
        self.post(R::PATH, input).await
    }

    pub async fn update<R: Resource>(&self, id: i32, input: &R::Input) -> Result<R> {
        self.put(&format!("{}/{}", R::PATH, id), input).await
    }

    pub async fn remove<R: Resource>(&self, id: i32) -> Result<()> {
        self.delete(&format!("{}/{}", R::PATH, id)).await
    }

    // Works
    pub async fn list_works(&self, search: Option<&str>) -> Result<Vec<Work>> {
        self.list(search_query(search)).await
    }

    pub async fn create_work(&self, input: &WorkInput) -> Result<Work> {
        self.create::<Work>(input).await
    }

    pub async fn update_work(&self, id: i32, input: &WorkInput) -> Result<Work> {
        self.update::<Work>(id, input).await
    }

    pub async fn delete_work(&self, id: i32) -> Result<()> {
        self.remove::<Work>(id).await
    }

    // Employees
    pub async fn list_employees(&self, search: Option<&str>) -> Result<Vec<Employee>> {
        self.list(search_query(search)).await
    }

    pub async fn create_employee(&self, input: &EmployeeInput) -> Result<Employee> {
        self.create::<Employee>(input).await
    }

    pub async fn update_employee(&self, id: i32, input: &EmployeeInput) -> Result<Employee> {
        self.update::<Employee>(id, input).await
    }

    pub async fn delete_employee(&self, id: i32) -> Result<()> {
        self.remove::<Employee>(id).await
    }

    // Materials
    pub async fn list_materials(&self, search: Option<&str>) -> Result<Vec<Material>> {
        self.list(search_query(search)).await
    }

    pub async fn create_material(&self, input: &MaterialInput) -> Result<Material> {
        self.create::<Material>(input).await
    }

    pub async fn update_material(&self, id: i32, input: &MaterialInput) -> Result<Material> {
        self.update::<Material>(id, input).await
    }

    pub async fn delete_material(&self, id: i32) -> Result<()> {
        self.remove::<Material>(id).await
    }

    // Projects
    pub async fn list_projects(&self, work_id: Option<i32>) -> Result<Vec<Project>> {
        let query = work_id
            .map(|id| vec![("obra_id".to_string(), id.to_string())])
            .unwrap_or_default();
        self.list(query).await
    }

    pub async fn create_project(&self, input: &ProjectInput) -> Result<Project> {
        self.create::<Project>(input).await
    }

    pub async fn update_project(&self, id: i32, input: &ProjectInput) -> Result<Project> {
        self.update::<Project>(id, input).await
    }

    pub async fn delete_project(&self, id: i32) -> Result<()> {
        self.remove::<Project>(id).await
    }

    // Health
    pub async fn health(&self) -> Result<HealthStatus> {
        self.get("/health", Vec::new()).await
    }

    pub async fn health_db(&self) -> Result<HealthStatus> {
        self.get("/health/db", Vec::new()).await
    }
}

/// `q` is only sent for a non-empty search term.
fn search_query(search: Option<&str>) -> Vec<(String, String)> {
    match search.map(str::trim) {
        Some(term) if !term.is_empty() => vec![("q".to_string(), term.to_string())],
        _ => Vec::new(),
    }
}
