//! Portfolio Dashboard
//! Usage: portfolio-dash [OPTIONS] <COMMAND>
//!
//! Commands:
//!   run            Keep the page file up to date, switch filters from stdin
//!   snapshot       Load once and print the page
//!   test-endpoint  Fetch one endpoint and log the response
//!   test-all       Fetch every known endpoint
//!   task           Look up one task by id

use anyhow::{Context, Result};
use clap::Parser;
use portfolio_dash::cli::{init_logging, Cli, Commands, ConsoleNotifier};
use portfolio_dash::diagnostics::{lookup_task, test_all_endpoints, test_endpoint};
use portfolio_dash::{
    Dashboard, DashboardSettings, DashConfig, FileSurface, HttpBackend, PageShell, PageSurface,
};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

const DEFAULT_OUTPUT: &str = "dashboard.html";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(DashConfig::default_path);
    let mut config = DashConfig::load(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
        config.validate()?;
    }

    init_logging(&cli, &config.logging);
    debug!("Configuration: {:?}", config);

    match cli.command {
        Commands::Run { output } => run(config, output).await?,
        Commands::Snapshot { output, filter } => snapshot(config, output, &filter).await?,
        Commands::TestEndpoint { endpoint, wait } => {
            let backend = HttpBackend::from_config(&config)?;
            let outcome = test_endpoint(&backend, &ConsoleNotifier { wait }, &endpoint).await;
            if !outcome.is_success() {
                std::process::exit(1);
            }
        }
        Commands::TestAll { wait } => {
            let backend = HttpBackend::from_config(&config)?;
            let outcomes = test_all_endpoints(&backend, &ConsoleNotifier { wait }).await;
            if outcomes.iter().any(|o| !o.is_success()) {
                std::process::exit(1);
            }
        }
        Commands::Task { id } => {
            let backend = HttpBackend::from_config(&config)?;
            if lookup_task(&backend, &ConsoleNotifier { wait: false }, id).await.is_err() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn page_shell(config: &DashConfig) -> PageShell {
    PageShell::new(&config.title, &config.api_url)
}

async fn run(config: DashConfig, output: Option<PathBuf>) -> Result<()> {
    let output = output
        .or_else(|| config.output.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let backend = HttpBackend::from_config(&config)?;
    let surface = FileSurface::create(&output, page_shell(&config))?;
    let dashboard = Dashboard::new(backend, surface, DashboardSettings::from(&config));
    info!("Writing dashboard to {:?} (backend {})", output, config.api_url);

    // Same steps as `Dashboard::initialize`, but the initial loads run in the
    // background so filter commands are read while they are pending.
    dashboard.render_filter_bar();
    let refresh = dashboard.start_status_refresh();
    {
        let dashboard = dashboard.clone();
        tokio::spawn(async move { dashboard.load_all().await });
    }

    info!("Filters: all, completed, in-progress, pending. q to quit.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.trim() {
                    "" => continue,
                    "q" | "quit" | "exit" => break,
                    declared => {
                        let ticket = dashboard.select_filter(declared);
                        let dashboard = dashboard.clone();
                        tokio::spawn(async move { dashboard.complete_task_load(ticket).await });
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    refresh.stop();
    info!("Dashboard stopped");
    Ok(())
}

async fn snapshot(config: DashConfig, output: Option<PathBuf>, filter: &str) -> Result<()> {
    let backend = HttpBackend::from_config(&config)?;
    let dashboard = Dashboard::new(
        backend,
        PageSurface::new(page_shell(&config)),
        DashboardSettings::from(&config),
    );

    dashboard.select_filter(filter);
    dashboard.load_all().await;

    let document = dashboard.surface().document();
    match output {
        Some(path) => {
            std::fs::write(&path, document)
                .with_context(|| format!("Failed to write {:?}", path))?;
            info!("Snapshot written to {:?}", path);
        }
        None => print!("{}", document),
    }
    Ok(())
}
