//! In-memory collaborators shared by the unit tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use portfolio_types::{PortfolioError, PortfolioResult};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

use crate::api::{ApiRequest, Backend};
use crate::diagnostics::Notifier;

#[derive(Clone)]
enum Reply {
    Json(Value),
    Fail(PortfolioError),
}

#[derive(Clone)]
struct Route {
    reply: Reply,
    delay: Duration,
}

/// Backend answering from a table keyed by the request's display form
/// (`/api/tasks?status=pending`). Unknown requests fail with a 404.
#[derive(Default)]
pub struct ScriptedBackend {
    routes: Mutex<HashMap<String, Route>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend serving the sample payloads of all four known endpoints.
    pub fn with_samples() -> Self {
        let backend = Self::new();
        backend.reply_json("/health", sample_health());
        backend.reply_json("/api/status", sample_status());
        backend.reply_json("/api/tasks", sample_tasks(None));
        for status in ["completed", "in-progress", "pending"] {
            let route = format!("/api/tasks?status={}", status);
            backend.reply_json(&route, sample_tasks(Some(status)));
        }
        backend.reply_json("/api/info", sample_info());
        backend
    }

    pub fn reply_json(&self, key: &str, value: Value) {
        self.routes.lock().insert(
            key.to_string(),
            Route {
                reply: Reply::Json(value),
                delay: Duration::ZERO,
            },
        );
    }

    pub fn reply_error(&self, key: &str, error: PortfolioError) {
        self.routes.lock().insert(
            key.to_string(),
            Route {
                reply: Reply::Fail(error),
                delay: Duration::ZERO,
            },
        );
    }

    /// Delay the reply for `key` (uses tokio time, so paused clocks apply).
    pub fn delay(&self, key: &str, delay: Duration) {
        if let Some(route) = self.routes.lock().get_mut(key) {
            route.delay = delay;
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests.lock().iter().filter(|r| r.path == path).count()
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn get_json(&self, request: &ApiRequest) -> PortfolioResult<Value> {
        self.requests.lock().push(request.clone());
        let key = request.to_string();
        let route = self.routes.lock().get(&key).cloned();

        let Some(route) = route else {
            return Err(PortfolioError::Http {
                status: 404,
                path: key,
            });
        };
        if !route.delay.is_zero() {
            tokio::time::sleep(route.delay).await;
        }
        match route.reply {
            Reply::Json(value) => Ok(value),
            Reply::Fail(error) => Err(error),
        }
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn acknowledge(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

pub fn sample_health() -> Value {
    json!({
        "status": "healthy",
        "timestamp": "2024-03-05T14:07:09.512345",
        "hostname": "web-5c8d7",
        "version": "1.0.0"
    })
}

pub fn sample_status() -> Value {
    json!({
        "app_name": "K8s-Terraform Portfolio Demo",
        "version": "1.0.0",
        "environment": "production",
        "hostname": "web-5c8d7",
        "timestamp": "2024-03-05T14:07:09.512345",
        "uptime": "Running in container"
    })
}

pub fn sample_tasks(status: Option<&str>) -> Value {
    let all = [
        (1, "Setup Kubernetes cluster", "completed", "high"),
        (2, "Configure Terraform", "completed", "high"),
        (3, "Deploy application", "in-progress", "medium"),
        (4, "Setup monitoring", "pending", "low"),
        (5, "Configure CI/CD", "pending", "medium"),
    ];
    let tasks: Vec<Value> = all
        .iter()
        .filter(|(_, _, s, _)| status.map_or(true, |wanted| *s == wanted))
        .map(|(id, title, s, priority)| {
            json!({"id": id, "title": title, "status": s, "priority": priority})
        })
        .collect();
    json!({"count": tasks.len(), "tasks": tasks})
}

pub fn sample_info() -> Value {
    json!({
        "kubernetes": {
            "namespace": "portfolio",
            "pod_name": "web-5c8d7-x2x9q",
            "service_account": "portfolio-sa"
        },
        "container": {"hostname": "web-5c8d7", "environment": "production"},
        "application": {"name": "K8s-Terraform Portfolio Demo", "version": "1.0.0"}
    })
}
