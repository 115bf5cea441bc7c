use super::*;
use crate::render::{Container, NO_TASKS_MESSAGE};
use crate::surface::PageSurface;
use crate::testing::ScriptedBackend;
use portfolio_types::{PortfolioError, INFO_PATH, STATUS_PATH, TASKS_PATH};
use std::sync::Arc;

type TestDashboard = Dashboard<Arc<ScriptedBackend>, Arc<PageSurface>>;

fn dashboard_with(
    backend: ScriptedBackend,
    settings: DashboardSettings,
) -> (TestDashboard, Arc<ScriptedBackend>, Arc<PageSurface>) {
    let backend = Arc::new(backend);
    let surface = Arc::new(PageSurface::default());
    let dashboard = Dashboard::new(backend.clone(), surface.clone(), settings);
    (dashboard, backend, surface)
}

fn fragment(surface: &PageSurface, container: Container) -> String {
    surface
        .fragment(container)
        .map(|f| f.into_string())
        .unwrap_or_default()
}

#[tokio::test(start_paused = true)]
async fn test_initial_load_populates_every_region() {
    let (dashboard, backend, surface) =
        dashboard_with(ScriptedBackend::with_samples(), DashboardSettings::default());

    let _refresh = dashboard.initialize().await;

    let status = fragment(&surface, Container::AppStatus);
    assert!(status.contains("web-5c8d7"));
    assert!(status.contains("production"));

    let tasks = fragment(&surface, Container::TasksList);
    assert_eq!(tasks.matches("class=\"task-item ").count(), 5);

    let env = fragment(&surface, Container::EnvInfo);
    assert!(env.contains("portfolio-sa"));

    for container in [Container::AppStatus, Container::TasksList, Container::EnvInfo] {
        assert!(!surface.fragment(container).unwrap().is_error(), "{container} shows an error");
    }

    assert_eq!(backend.count(STATUS_PATH), 1);
    assert_eq!(backend.count(TASKS_PATH), 1);
    assert_eq!(backend.count(INFO_PATH), 1);
    assert!(fragment(&surface, Container::FilterBar)
        .contains("filter-btn active\" data-status=\"all\""));

    let document = surface.document();
    assert!(document.contains("v1.0.0"));
    assert!(document.contains("badge environment\"><i class=\"fas fa-cog\"></i> production"));
}

#[tokio::test(start_paused = true)]
async fn test_periodic_refresh_only_reloads_status() {
    let (dashboard, backend, _surface) =
        dashboard_with(ScriptedBackend::with_samples(), DashboardSettings::default());

    let refresh = dashboard.initialize().await;
    assert_eq!(backend.count(STATUS_PATH), 1);

    tokio::time::sleep(Duration::from_secs(31)).await;

    assert_eq!(backend.count(STATUS_PATH), 2);
    assert_eq!(backend.count(TASKS_PATH), 1);
    assert_eq!(backend.count(INFO_PATH), 1);

    refresh.stop();
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(backend.count(STATUS_PATH), 2);
}

#[tokio::test(start_paused = true)]
async fn test_slow_status_skips_overlapping_ticks() {
    let backend = ScriptedBackend::with_samples();
    backend.delay(STATUS_PATH, Duration::from_secs(45));
    let (dashboard, backend, surface) = dashboard_with(backend, DashboardSettings::default());

    // Initial status holds the guard until t=45, so the t=30 tick is skipped;
    // the t=60 tick runs until t=105, so the t=90 tick is skipped too.
    let _refresh = dashboard.initialize().await;
    tokio::time::sleep(Duration::from_secs(55)).await;

    assert_eq!(backend.count(STATUS_PATH), 2);
    assert_eq!(surface.render_count(Container::AppStatus), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stop_cancels_status_load_in_flight() {
    let backend = ScriptedBackend::with_samples();
    backend.delay(STATUS_PATH, Duration::from_secs(10));
    let (dashboard, backend, surface) = dashboard_with(backend, DashboardSettings::default());

    let refresh = dashboard.initialize().await;
    assert_eq!(surface.render_count(Container::AppStatus), 1);

    // t=35: the t=30 tick is waiting on its response until t=40.
    tokio::time::sleep(Duration::from_secs(25)).await;
    assert_eq!(backend.count(STATUS_PATH), 2);

    refresh.stop();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(backend.count(STATUS_PATH), 2);
    assert_eq!(surface.render_count(Container::AppStatus), 1);

    // The cancelled load released the overlap guard.
    assert!(dashboard.refresh_status().await);
    assert_eq!(surface.render_count(Container::AppStatus), 2);
}

#[tokio::test(start_paused = true)]
async fn test_partial_failure_is_scoped() {
    let backend = ScriptedBackend::with_samples();
    backend.reply_error(
        TASKS_PATH,
        PortfolioError::Http {
            status: 500,
            path: TASKS_PATH.to_string(),
        },
    );
    let (dashboard, _backend, surface) = dashboard_with(backend, DashboardSettings::default());

    let _refresh = dashboard.initialize().await;

    let tasks = surface.fragment(Container::TasksList).unwrap();
    assert!(tasks.is_error());
    assert!(tasks.contains("Błąd ładowania zadań"));
    assert!(!surface.fragment(Container::AppStatus).unwrap().is_error());
    assert!(!surface.fragment(Container::EnvInfo).unwrap().is_error());
}

#[tokio::test]
async fn test_failures_render_scoped_messages() {
    let backend = ScriptedBackend::new();
    backend.reply_json(STATUS_PATH, serde_json::json!({"unexpected": true}));
    let (dashboard, _backend, surface) = dashboard_with(backend, DashboardSettings::default());

    dashboard.load_status().await;
    dashboard.load_environment_info().await;

    assert!(fragment(&surface, Container::AppStatus)
        .contains("Błąd ładowania statusu aplikacji"));
    assert!(fragment(&surface, Container::EnvInfo)
        .contains("Błąd ładowania informacji środowiska"));
    assert!(surface.fragment(Container::TasksList).is_none());
}

#[tokio::test]
async fn test_failure_leaves_other_regions_untouched() {
    let (dashboard, backend, surface) =
        dashboard_with(ScriptedBackend::with_samples(), DashboardSettings::default());
    dashboard.load_all().await;
    let before_status = surface.fragment(Container::AppStatus);
    let before_tasks = surface.fragment(Container::TasksList);

    backend.reply_error(INFO_PATH, PortfolioError::Network("connection reset".into()));
    dashboard.load_environment_info().await;

    assert!(surface.fragment(Container::EnvInfo).unwrap().is_error());
    assert_eq!(surface.fragment(Container::AppStatus), before_status);
    assert_eq!(surface.fragment(Container::TasksList), before_tasks);
}

#[tokio::test]
async fn test_filter_click_issues_one_filtered_fetch() {
    let (dashboard, backend, surface) =
        dashboard_with(ScriptedBackend::with_samples(), DashboardSettings::default());

    dashboard.set_filter("completed").await;

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, TASKS_PATH);
    assert_eq!(requests[0].query_value("status"), Some("completed"));

    let tasks = fragment(&surface, Container::TasksList);
    assert_eq!(tasks.matches("class=\"task-item ").count(), 2);
    assert!(tasks.contains("Ukończone"));
    assert!(!tasks.contains("W trakcie"));
}

#[tokio::test]
async fn test_all_filter_sends_no_query() {
    let (dashboard, backend, _surface) =
        dashboard_with(ScriptedBackend::with_samples(), DashboardSettings::default());

    dashboard.set_filter("pending").await;
    dashboard.set_filter("all").await;

    let last = backend.requests().pop().unwrap();
    assert_eq!(last.path, TASKS_PATH);
    assert!(last.query.is_empty());
}

#[tokio::test]
async fn test_exactly_one_active_control_after_each_click() {
    let (dashboard, _backend, surface) =
        dashboard_with(ScriptedBackend::with_samples(), DashboardSettings::default());

    for (index, declared) in [(2, "in-progress"), (3, "pending"), (0, "all"), (1, "completed")] {
        dashboard.click_control(index).await;

        let bar = fragment(&surface, Container::FilterBar);
        assert_eq!(bar.matches("filter-btn active").count(), 1);
        assert!(bar.contains(&format!("filter-btn active\" data-status=\"{declared}\"")));
        assert_eq!(dashboard.active_control(), index);
        assert_eq!(dashboard.current_filter().as_str(), declared);
    }
}

#[tokio::test]
async fn test_empty_filter_result_shows_placeholder() {
    let backend = ScriptedBackend::with_samples();
    backend.reply_json("/api/tasks?status=archived", serde_json::json!({"tasks": [], "count": 0}));
    let (dashboard, backend, surface) = dashboard_with(backend, DashboardSettings::default());

    dashboard.set_filter("archived").await;

    assert_eq!(backend.requests()[0].query_value("status"), Some("archived"));
    assert!(fragment(&surface, Container::TasksList).contains(NO_TASKS_MESSAGE));
}

#[tokio::test(start_paused = true)]
async fn test_stale_task_response_is_discarded() {
    let backend = ScriptedBackend::with_samples();
    backend.delay("/api/tasks?status=completed", Duration::from_secs(10));
    let (dashboard, _backend, surface) = dashboard_with(backend, DashboardSettings::default());

    tokio::join!(dashboard.set_filter("completed"), dashboard.set_filter("pending"));

    let tasks = fragment(&surface, Container::TasksList);
    assert!(tasks.contains("Setup monitoring"));
    assert!(!tasks.contains("Setup Kubernetes cluster"));
    assert_eq!(surface.render_count(Container::TasksList), 1);
    assert_eq!(dashboard.current_filter(), StatusFilter::Pending);
}

#[tokio::test(start_paused = true)]
async fn test_legacy_mode_lets_late_response_win() {
    let backend = ScriptedBackend::with_samples();
    backend.delay("/api/tasks?status=completed", Duration::from_secs(10));
    let settings = DashboardSettings {
        discard_stale_tasks: false,
        ..DashboardSettings::default()
    };
    let (dashboard, _backend, surface) = dashboard_with(backend, settings);

    tokio::join!(dashboard.set_filter("completed"), dashboard.set_filter("pending"));

    let tasks = fragment(&surface, Container::TasksList);
    assert!(tasks.contains("Setup Kubernetes cluster"));
    assert_eq!(surface.render_count(Container::TasksList), 2);
}

#[tokio::test]
async fn test_renders_are_idempotent() {
    let (dashboard, _backend, surface) =
        dashboard_with(ScriptedBackend::with_samples(), DashboardSettings::default());

    dashboard.load_all().await;
    let first = surface.snapshot();
    dashboard.load_all().await;
    assert_eq!(surface.snapshot(), first);
}
