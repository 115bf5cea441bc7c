use askama::Template;
use portfolio_types::{AppStatus, StatusFilter};
use std::collections::HashMap;

use super::helpers::status_label;
use super::{render_template, Container, Fragment};

pub(super) const ERROR_MARKER: &str = "fa-exclamation-triangle";

const LOADING_PLACEHOLDER: &str =
    "<div class=\"loading\"><i class=\"fas fa-spinner fa-spin\"></i> Ładowanie...</div>";

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    marker: &'static str,
    message: &'a str,
}

pub fn render_error(message: &str) -> Fragment {
    render_template(ErrorTemplate {
        marker: ERROR_MARKER,
        message,
    })
}

pub fn filter_label(filter: &StatusFilter) -> &str {
    match filter {
        StatusFilter::All => "Wszystkie",
        other => status_label(other.as_str()),
    }
}

struct FilterControl<'a> {
    value: &'a str,
    label: &'a str,
    active: bool,
}

#[derive(Template)]
#[template(path = "filter_bar.html")]
struct FilterBarTemplate<'a> {
    controls: Vec<FilterControl<'a>>,
}

/// Filter controls; exactly the control at `active` carries the `active` class.
pub fn render_filter_bar(controls: &[StatusFilter], active: usize) -> Fragment {
    render_template(FilterBarTemplate {
        controls: controls
            .iter()
            .enumerate()
            .map(|(index, control)| FilterControl {
                value: control.as_str(),
                label: filter_label(control),
                active: index == active,
            })
            .collect(),
    })
}

/// Static page chrome around the dashboard regions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageShell {
    pub title: String,
    /// Application version and environment, known once a status has loaded.
    pub version: Option<String>,
    pub environment: Option<String>,
    /// Backend the regions are loaded from.
    pub source: String,
}

impl PageShell {
    pub fn new(title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: None,
            environment: None,
            source: source.into(),
        }
    }

    /// Take the header badges from `status`. Returns whether anything changed.
    pub fn apply_status(&mut self, status: &AppStatus) -> bool {
        let version = Some(status.version.clone());
        let environment = Some(status.environment.clone());
        if self.version == version && self.environment == environment {
            return false;
        }
        self.version = version;
        self.environment = environment;
        true
    }
}

impl Default for PageShell {
    fn default() -> Self {
        Self::new("K8s-Terraform Portfolio Demo", "http://127.0.0.1:5000")
    }
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    title: &'a str,
    version: Option<&'a str>,
    environment: Option<&'a str>,
    source: &'a str,
    app_status: &'a str,
    filter_bar: &'a str,
    tasks_list: &'a str,
    env_info: &'a str,
}

/// Full HTML document with each known region's current fragment, or a
/// loading placeholder for regions never rendered.
pub fn compose_page(shell: &PageShell, regions: &HashMap<Container, Fragment>) -> String {
    let region = |container: Container| {
        regions
            .get(&container)
            .map(Fragment::as_str)
            .unwrap_or(LOADING_PLACEHOLDER)
    };

    render_template(PageTemplate {
        title: &shell.title,
        version: shell.version.as_deref(),
        environment: shell.environment.as_deref(),
        source: &shell.source,
        app_status: region(Container::AppStatus),
        filter_bar: region(Container::FilterBar),
        tasks_list: region(Container::TasksList),
        env_info: region(Container::EnvInfo),
    })
    .into_string()
}
