//! Dashboard controller: owns the filter selection, drives the loads and
//! the periodic status refresh.

mod refresh;
mod state;

#[cfg(test)]
mod tests;

pub use refresh::RefreshHandle;
pub use state::{FilterState, TaskTicket};

use parking_lot::Mutex;
use portfolio_types::StatusFilter;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::api::{fetch_environment, fetch_status, fetch_tasks, Backend};
use crate::config::{DashConfig, DEFAULT_REFRESH_SECS};
use crate::render::{
    render_app_status, render_environment_info, render_error, render_filter_bar, render_tasks,
    Container,
};
use crate::surface::Surface;

#[derive(Clone, Debug)]
pub struct DashboardSettings {
    pub refresh_interval: Duration,
    pub discard_stale_tasks: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            discard_stale_tasks: true,
        }
    }
}

impl From<&DashConfig> for DashboardSettings {
    fn from(config: &DashConfig) -> Self {
        Self {
            refresh_interval: config.refresh_interval(),
            discard_stale_tasks: config.discard_stale_tasks,
        }
    }
}

struct Inner<B, S> {
    backend: B,
    surface: S,
    settings: DashboardSettings,
    filter: Mutex<FilterState>,
    status_in_flight: AtomicBool,
}

/// Cheap to clone; clones share one backend, surface and filter state.
pub struct Dashboard<B, S> {
    inner: Arc<Inner<B, S>>,
}

impl<B, S> Clone for Dashboard<B, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B, S> Dashboard<B, S>
where
    B: Backend + 'static,
    S: Surface + 'static,
{
    pub fn new(backend: B, surface: S, settings: DashboardSettings) -> Self {
        Self::with_filter_state(backend, surface, settings, FilterState::default())
    }

    pub fn with_filter_state(
        backend: B,
        surface: S,
        settings: DashboardSettings,
        filter: FilterState,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                backend,
                surface,
                settings,
                filter: Mutex::new(filter),
                status_in_flight: AtomicBool::new(false),
            }),
        }
    }

    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    pub fn surface(&self) -> &S {
        &self.inner.surface
    }

    pub fn current_filter(&self) -> StatusFilter {
        self.inner.filter.lock().current().clone()
    }

    pub fn active_control(&self) -> usize {
        self.inner.filter.lock().active_index()
    }

    /// Render the filter controls, start the status timer and load all
    /// three regions. Returns once the initial loads have settled; the timer
    /// keeps running until the returned handle is stopped or dropped.
    pub async fn initialize(&self) -> RefreshHandle {
        info!(
            "Initializing dashboard (status refresh every {:?})",
            self.inner.settings.refresh_interval
        );
        self.render_filter_bar();
        let handle = self.start_status_refresh();
        self.load_all().await;
        handle
    }

    /// One load of each region, run concurrently.
    pub async fn load_all(&self) {
        tokio::join!(
            self.refresh_status(),
            self.load_tasks(),
            self.load_environment_info(),
        );
    }

    pub fn start_status_refresh(&self) -> RefreshHandle {
        let dashboard = self.clone();
        let period = self.inner.settings.refresh_interval;

        RefreshHandle::new(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                dashboard.refresh_status().await;
            }
        }))
    }

    /// Status load guarded against overlap: returns `false` without fetching
    /// while a previous status load is still pending.
    pub async fn refresh_status(&self) -> bool {
        let Some(_in_flight) = refresh::InFlight::acquire(&self.inner.status_in_flight) else {
            debug!("Status refresh still pending, skipping tick");
            return false;
        };
        self.load_status().await;
        true
    }

    pub async fn load_status(&self) {
        match fetch_status(&self.inner.backend).await {
            Ok(status) => {
                self.inner.surface.update_header(&status);
                self.inner
                    .surface
                    .render(Container::AppStatus, render_app_status(&status));
            }
            Err(e) => {
                error!("Failed to load application status: {}", e);
                self.render_load_error(Container::AppStatus);
            }
        }
    }

    pub async fn load_tasks(&self) {
        let ticket = self.inner.filter.lock().begin_request();
        self.complete_task_load(ticket).await;
    }

    pub async fn load_environment_info(&self) {
        match fetch_environment(&self.inner.backend).await {
            Ok(info) => {
                self.inner
                    .surface
                    .render(Container::EnvInfo, render_environment_info(&info));
            }
            Err(e) => {
                error!("Failed to load environment info: {}", e);
                self.render_load_error(Container::EnvInfo);
            }
        }
    }

    /// A filter control declaring `declared` was activated: move the
    /// highlight, store the filter and reload the task list.
    pub async fn set_filter(&self, declared: &str) {
        let ticket = self.select_filter(declared);
        self.complete_task_load(ticket).await;
    }

    /// Synchronous half of [`Dashboard::set_filter`]. Callers that spawn the
    /// fetch use this so the request order follows the selection order.
    pub fn select_filter(&self, declared: &str) -> TaskTicket {
        let ticket = {
            let mut state = self.inner.filter.lock();
            state.select(declared);
            state.begin_request()
        };
        debug!("Filter set to {} (request #{})", ticket.filter, ticket.seq);
        self.render_filter_bar();
        ticket
    }

    /// Activate the filter control at `index`. Unknown indexes are ignored.
    pub async fn click_control(&self, index: usize) {
        let ticket = {
            let mut state = self.inner.filter.lock();
            if !state.activate(index) {
                debug!("No filter control at index {}", index);
                return;
            }
            state.begin_request()
        };
        self.render_filter_bar();
        self.complete_task_load(ticket).await;
    }

    pub async fn complete_task_load(&self, ticket: TaskTicket) {
        let result = fetch_tasks(&self.inner.backend, &ticket.filter).await;

        if self.inner.settings.discard_stale_tasks && !self.inner.filter.lock().is_latest(&ticket) {
            debug!(
                "Discarding task response #{} for filter {}: superseded",
                ticket.seq, ticket.filter
            );
            return;
        }

        match result {
            Ok(list) => {
                debug!("Loaded {} task(s) for filter {}", list.len(), ticket.filter);
                self.inner
                    .surface
                    .render(Container::TasksList, render_tasks(&list.tasks));
            }
            Err(e) => {
                error!("Failed to load tasks: {}", e);
                self.render_load_error(Container::TasksList);
            }
        }
    }

    pub fn render_filter_bar(&self) {
        let fragment = {
            let state = self.inner.filter.lock();
            render_filter_bar(state.controls(), state.active_index())
        };
        self.inner.surface.render(Container::FilterBar, fragment);
    }

    fn render_load_error(&self, container: Container) {
        self.inner
            .surface
            .render(container, render_error(container.load_error_message()));
    }
}
