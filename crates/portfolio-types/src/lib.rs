#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! View models consumed by the portfolio dashboard.
//!
//! Every type here mirrors the JSON shape of one backend endpoint. None of
//! them are created or mutated by the dashboard beyond being rendered.

mod error;
mod filter;

pub use error::{PortfolioError, PortfolioResult};
pub use filter::StatusFilter;

use serde::{Deserialize, Serialize};

/// Liveness endpoint.
pub const HEALTH_PATH: &str = "/health";

/// Application status endpoint.
pub const STATUS_PATH: &str = "/api/status";

/// Task list endpoint; accepts a `status` query parameter.
pub const TASKS_PATH: &str = "/api/tasks";

/// Environment information endpoint.
pub const INFO_PATH: &str = "/api/info";

/// Endpoints probed by the all-endpoints diagnostic, in probe order.
pub const KNOWN_ENDPOINTS: [&str; 4] = [HEALTH_PATH, STATUS_PATH, TASKS_PATH, INFO_PATH];

/// Status of a finished task.
pub const TASK_STATUS_COMPLETED: &str = "completed";

/// Status of a task being worked on.
pub const TASK_STATUS_IN_PROGRESS: &str = "in-progress";

/// Status of a task not yet started.
pub const TASK_STATUS_PENDING: &str = "pending";

/// High task priority.
pub const PRIORITY_HIGH: &str = "high";

/// Medium task priority.
pub const PRIORITY_MEDIUM: &str = "medium";

/// Low task priority.
pub const PRIORITY_LOW: &str = "low";

/// Response of `/api/status`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppStatus {
    /// Host serving the backend.
    pub hostname: String,
    /// Deployed application version.
    pub version: String,
    /// Deployment environment name.
    pub environment: String,
    /// ISO-8601, possibly without an offset.
    pub timestamp: String,
    /// Application name; not rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    /// Free-form uptime description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<String>,
}

/// Status and priority stay raw strings: unknown values are displayed as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// One of the `TASK_STATUS_*` values, or anything else.
    pub status: String,
    /// One of the `PRIORITY_*` values, or anything else.
    pub priority: String,
}

/// Response of `/api/tasks`, in server order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    /// Tasks in server order.
    pub tasks: Vec<Task>,
    /// Count reported by the server, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl TaskList {
    /// True when the list holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks held.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

/// Kubernetes placement of the backend pod.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KubernetesInfo {
    /// Namespace the pod runs in.
    pub namespace: String,
    /// Pod name.
    pub pod_name: String,
    /// Service account the pod runs as.
    pub service_account: String,
}

/// Container the backend runs in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerInfo {
    /// Container hostname.
    pub hostname: String,
    /// Deployment environment name.
    pub environment: String,
}

/// Application identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInfo {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
}

/// Response of `/api/info`. All fields are required.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    /// Kubernetes section.
    pub kubernetes: KubernetesInfo,
    /// Container section.
    pub container: ContainerInfo,
    /// Application section.
    pub application: ApplicationInfo,
}

/// Response of `/health`. Only read by diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// `healthy` when the backend is up.
    pub status: String,
    /// Time of the check, ISO-8601.
    pub timestamp: String,
    /// Host answering the check.
    pub hostname: String,
    /// Application version.
    pub version: String,
}

impl HealthReport {
    /// True when the backend reported itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Parse a backend timestamp. Accepts RFC 3339 with an offset or a naive
/// ISO-8601 date-time, which is taken as wall-clock time in `tz`.
pub fn parse_timestamp<Tz: chrono::TimeZone>(
    raw: &str,
    tz: &Tz,
) -> Option<chrono::DateTime<Tz>> {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    tz.from_local_datetime(&naive).earliest()
}
