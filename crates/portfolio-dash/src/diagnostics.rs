//! Manual endpoint probes for interactive debugging.

use portfolio_types::{PortfolioError, Task, KNOWN_ENDPOINTS};
use serde_json::Value;
use tracing::{error, info};

use crate::api::{fetch_task, ApiRequest, Backend};

/// Blocking acknowledgment shown to the person running a probe.
pub trait Notifier: Send + Sync {
    fn acknowledge(&self, message: &str);
}

#[derive(Debug)]
pub struct ProbeOutcome {
    pub endpoint: String,
    pub result: Result<Value, PortfolioError>,
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

async fn probe<B: Backend + ?Sized>(backend: &B, endpoint: &str) -> ProbeOutcome {
    let result = match ApiRequest::from_endpoint(endpoint) {
        Ok(request) => backend.get_json(&request).await,
        Err(e) => Err(e),
    };
    ProbeOutcome {
        endpoint: endpoint.to_string(),
        result,
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Fetch one arbitrary endpoint, log the parsed body and acknowledge.
pub async fn test_endpoint<B: Backend + ?Sized>(
    backend: &B,
    notifier: &dyn Notifier,
    endpoint: &str,
) -> ProbeOutcome {
    let outcome = probe(backend, endpoint).await;
    match &outcome.result {
        Ok(value) => {
            info!("Response from {}:\n{}", endpoint, pretty(value));
            notifier.acknowledge(&format!("Sprawdź konsolę dla odpowiedzi z {}", endpoint));
        }
        Err(e) => {
            error!("Error testing {}: {}", endpoint, e);
            notifier.acknowledge(&format!("Błąd podczas testowania {}: {}", endpoint, e));
        }
    }
    outcome
}

/// Probe every known endpoint in order. A failure is logged and the next
/// endpoint is still probed; one acknowledgment follows the whole run.
pub async fn test_all_endpoints<B: Backend + ?Sized>(
    backend: &B,
    notifier: &dyn Notifier,
) -> Vec<ProbeOutcome> {
    info!("=== Testing All Endpoints ===");

    let mut outcomes = Vec::with_capacity(KNOWN_ENDPOINTS.len());
    for endpoint in KNOWN_ENDPOINTS {
        let outcome = probe(backend, endpoint).await;
        match &outcome.result {
            Ok(value) => info!("OK {}:\n{}", endpoint, pretty(value)),
            Err(e) => error!("FAILED {}: {}", endpoint, e),
        }
        outcomes.push(outcome);
    }

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    info!(
        "Endpoint check finished: {} ok, {} failed",
        outcomes.len() - failed,
        failed
    );
    notifier.acknowledge("Sprawdź konsolę dla wyników testów wszystkich endpointów");
    outcomes
}

/// Look up a single task by id.
pub async fn lookup_task<B: Backend + ?Sized>(
    backend: &B,
    notifier: &dyn Notifier,
    id: i64,
) -> Result<Task, PortfolioError> {
    let result = fetch_task(backend, id).await;
    match &result {
        Ok(task) => {
            info!("Task #{}: {} [{} / {}]", task.id, task.title, task.status, task.priority);
            notifier.acknowledge(&format!("Zadanie #{}: {}", task.id, task.title));
        }
        Err(PortfolioError::NotFound(_)) => {
            error!("Task {} not found", id);
            notifier.acknowledge(&format!("Nie znaleziono zadania #{}", id));
        }
        Err(e) => {
            error!("Error fetching task {}: {}", id, e);
            notifier.acknowledge(&format!("Błąd podczas pobierania zadania #{}: {}", id, e));
        }
    }
    result
}
