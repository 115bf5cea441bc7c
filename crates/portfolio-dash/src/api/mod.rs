//! Read access to the portfolio backend.

mod http;


pub use http::HttpBackend;

use async_trait::async_trait;
use portfolio_types::{
    AppStatus, EnvironmentInfo, HealthReport, PortfolioError, PortfolioResult, StatusFilter,
    Task, TaskList, HEALTH_PATH, INFO_PATH, STATUS_PATH, TASKS_PATH,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use reqwest::Url;
use std::fmt;
use std::sync::Arc;

/// Placeholder origin endpoints are resolved against; only path and query survive.
const ENDPOINT_BASE: &str = "http://backend/";

/// A GET against the backend: a path plus query pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Parse a caller-supplied endpoint such as `/api/tasks?status=pending`.
    /// Query values are percent-decoded; a missing leading slash is implied.
    /// Only the path and query are kept, so an absolute URL cannot redirect
    /// the request to another host.
    pub fn from_endpoint(endpoint: &str) -> PortfolioResult<Self> {
        let url = Url::parse(ENDPOINT_BASE)
            .and_then(|base| base.join(endpoint.trim()))
            .map_err(|e| PortfolioError::InvalidEndpoint(format!("{:?}: {}", endpoint, e)))?;

        Ok(Self {
            path: url.path().to_string(),
            query: url.query_pairs().into_owned().collect(),
        })
    }

    pub fn tasks(filter: &StatusFilter) -> Self {
        let request = Self::new(TASKS_PATH);
        match filter.query_value() {
            Some(status) => request.with_query("status", status),
            None => request,
        }
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (index, (key, value)) in self.query.iter().enumerate() {
            let sep = if index == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, key, value)?;
        }
        Ok(())
    }
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// Issue the GET and parse the body as JSON. Non-success statuses fail.
    async fn get_json(&self, request: &ApiRequest) -> PortfolioResult<Value>;
}

#[async_trait]
impl<T: Backend + ?Sized> Backend for Arc<T> {
    async fn get_json(&self, request: &ApiRequest) -> PortfolioResult<Value> {
        (**self).get_json(request).await
    }
}

fn decode<T: DeserializeOwned>(value: Value, request: &ApiRequest) -> PortfolioResult<T> {
    serde_json::from_value(value)
        .map_err(|e| PortfolioError::Decode(format!("{}: {}", request, e)))
}

async fn fetch<T, B>(backend: &B, request: ApiRequest) -> PortfolioResult<T>
where
    T: DeserializeOwned,
    B: Backend + ?Sized,
{
    let value = backend.get_json(&request).await?;
    decode(value, &request)
}

pub async fn fetch_status<B: Backend + ?Sized>(backend: &B) -> PortfolioResult<AppStatus> {
    fetch(backend, ApiRequest::new(STATUS_PATH)).await
}

pub async fn fetch_tasks<B: Backend + ?Sized>(
    backend: &B,
    filter: &StatusFilter,
) -> PortfolioResult<TaskList> {
    fetch(backend, ApiRequest::tasks(filter)).await
}

pub async fn fetch_environment<B: Backend + ?Sized>(
    backend: &B,
) -> PortfolioResult<EnvironmentInfo> {
    fetch(backend, ApiRequest::new(INFO_PATH)).await
}

pub async fn fetch_health<B: Backend + ?Sized>(backend: &B) -> PortfolioResult<HealthReport> {
    fetch(backend, ApiRequest::new(HEALTH_PATH)).await
}

/// `GET /api/tasks/{id}`; a 404 becomes [`PortfolioError::NotFound`].
pub async fn fetch_task<B: Backend + ?Sized>(backend: &B, id: i64) -> PortfolioResult<Task> {
    let request = ApiRequest::new(format!("{}/{}", TASKS_PATH, id));
    match fetch(backend, request).await {
        Err(PortfolioError::Http { status: 404, .. }) => {
            Err(PortfolioError::NotFound(format!("task {}", id)))
        }
        other => other,
    }
}
