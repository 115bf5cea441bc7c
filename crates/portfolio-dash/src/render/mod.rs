//! HTML fragment generation.
//!
//! Every renderer is a pure function of its input: the same data always
//! yields the same bytes, and each fragment fully replaces its region.

mod environment;
mod helpers;
mod page;
mod status;
mod tasks;


pub use environment::render_environment_info;
pub use helpers::{
    class_token, format_timestamp, format_timestamp_in, priority_label, status_label,
    INVALID_TIMESTAMP,
};
pub use page::{compose_page, filter_label, render_error, render_filter_bar, PageShell};
pub use status::{render_app_status, render_app_status_in};
pub use tasks::{render_tasks, NO_TASKS_MESSAGE};

use askama::Template;
use std::fmt;
use tracing::error;

/// Shown in place of a fragment whose template failed to render.
const RENDER_FAILED: &str = "<div style=\"text-align: center; padding: 20px; color: #dc3545;\">\
<i class=\"fas fa-exclamation-triangle\"></i> Błąd renderowania</div>";

fn render_template<T: Template>(template: T) -> Fragment {
    match template.render() {
        Ok(html) => Fragment::new(html),
        Err(e) => {
            error!("Failed to render {}: {}", std::any::type_name::<T>(), e);
            Fragment::new(RENDER_FAILED)
        }
    }
}

/// Custom template filters.
mod filters {
    pub fn class_token<T: std::fmt::Display>(value: T) -> ::askama::Result<String> {
        Ok(super::helpers::class_token(&value.to_string()))
    }
}

/// Named display regions of the dashboard page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Container {
    AppStatus,
    TasksList,
    EnvInfo,
    FilterBar,
}

impl Container {
    pub const ALL: [Container; 4] = [
        Container::AppStatus,
        Container::TasksList,
        Container::EnvInfo,
        Container::FilterBar,
    ];

    /// Element id the region is bound to in the page markup.
    pub fn id(&self) -> &'static str {
        match self {
            Container::AppStatus => "app-status",
            Container::TasksList => "tasks-list",
            Container::EnvInfo => "env-info",
            Container::FilterBar => "filter-bar",
        }
    }

    /// Scoped message shown when this region's data fails to load.
    pub fn load_error_message(&self) -> &'static str {
        match self {
            Container::AppStatus => "Błąd ładowania statusu aplikacji",
            Container::TasksList => "Błąd ładowania zadań",
            Container::EnvInfo => "Błąd ładowania informacji środowiska",
            Container::FilterBar => "Błąd ładowania filtrów",
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Complete replacement content for one region.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Fragment(String);

impl Fragment {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }

    pub fn is_error(&self) -> bool {
        self.0.contains(page::ERROR_MARKER)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
