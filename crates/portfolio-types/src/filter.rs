use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::{TASK_STATUS_COMPLETED, TASK_STATUS_IN_PROGRESS, TASK_STATUS_PENDING};

/// Task-status selector driving the `/api/tasks` query.
///
/// Parsing never fails: a value outside the four known selectors becomes
/// `Other` and is forwarded to the backend untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusFilter {
    /// No filtering.
    #[default]
    All,
    /// Finished tasks.
    Completed,
    /// Tasks being worked on.
    InProgress,
    /// Tasks not yet started.
    Pending,
    /// Any other declared value, forwarded verbatim.
    Other(String),
}

impl StatusFilter {
    /// The four selectors offered as filter controls, in display order.
    pub fn builtin() -> [StatusFilter; 4] {
        [
            StatusFilter::All,
            StatusFilter::Completed,
            StatusFilter::InProgress,
            StatusFilter::Pending,
        ]
    }

    /// Selector for the value a filter control declares.
    pub fn from_declared(value: &str) -> Self {
        match value {
            "all" => StatusFilter::All,
            TASK_STATUS_COMPLETED => StatusFilter::Completed,
            TASK_STATUS_IN_PROGRESS => StatusFilter::InProgress,
            TASK_STATUS_PENDING => StatusFilter::Pending,
            other => StatusFilter::Other(other.to_string()),
        }
    }

    /// Declared value of this selector.
    pub fn as_str(&self) -> &str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Completed => TASK_STATUS_COMPLETED,
            StatusFilter::InProgress => TASK_STATUS_IN_PROGRESS,
            StatusFilter::Pending => TASK_STATUS_PENDING,
            StatusFilter::Other(value) => value,
        }
    }

    /// Value of the `status` query parameter, or `None` when unfiltered.
    pub fn query_value(&self) -> Option<&str> {
        match self {
            StatusFilter::All => None,
            other => Some(other.as_str()),
        }
    }

    /// True for the unfiltered selector.
    pub fn is_all(&self) -> bool {
        matches!(self, StatusFilter::All)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_declared(s))
    }
}

impl From<String> for StatusFilter {
    fn from(value: String) -> Self {
        Self::from_declared(&value)
    }
}

impl From<StatusFilter> for String {
    fn from(value: StatusFilter) -> Self {
        value.as_str().to_string()
    }
}
