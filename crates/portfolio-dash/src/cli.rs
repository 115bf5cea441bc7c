use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::diagnostics::Notifier;

const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "portfolio-dash")]
#[command(version = BUILD_VERSION)]
#[command(about = "Portfolio dashboard - polls the backend API and renders the status page")]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(short, long, global = true, value_name = "FILE", help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_name = "URL",
        env = "PORTFOLIO_API_URL",
        help = "Backend base URL"
    )]
    pub api_url: Option<String>,

    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    #[arg(short, long, global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[arg(long, global = true, value_name = "FILE", help = "Write logs to file")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the dashboard")]
    #[command(long_about = "Load every region, refresh the status periodically and rewrite the page file.\n\nType a filter value (all, completed, in-progress, pending) and Enter to switch the task filter; q to quit.")]
    Run {
        #[arg(short, long, value_name = "FILE", help = "HTML file to keep up to date")]
        output: Option<PathBuf>,
    },

    #[command(about = "Load every region once and print or write the page")]
    Snapshot {
        #[arg(short, long, value_name = "FILE", help = "Write the page here instead of stdout")]
        output: Option<PathBuf>,
        #[arg(long, value_name = "STATUS", default_value = "all", help = "Task filter to apply")]
        filter: String,
    },

    #[command(about = "Fetch one endpoint and log the response")]
    TestEndpoint {
        #[arg(value_name = "PATH", help = "Endpoint path, e.g. /api/status")]
        endpoint: String,
        #[arg(long, help = "Wait for Enter after the result")]
        wait: bool,
    },

    #[command(about = "Fetch every known endpoint and log the responses")]
    TestAll {
        #[arg(long, help = "Wait for Enter after the summary")]
        wait: bool,
    },

    #[command(about = "Look up one task by id")]
    Task {
        #[arg(value_name = "ID")]
        id: i64,
    },
}

pub fn init_logging(cli: &Cli, config: &LoggingConfig) {
    let level = if cli.quiet {
        "warn".to_string()
    } else {
        match cli.verbose {
            0 => config.level.as_directive().to_string(),
            1 => "info,portfolio_dash=debug".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    let log_file = cli.log_file.as_ref().or(config.file.as_ref());
    let file = log_file.and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| eprintln!("Failed to open log file {:?}: {}", path, e))
            .ok()
    });

    match (file, config.json) {
        (Some(file), true) => subscriber
            .with(fmt::layer().json().with_writer(std::sync::Mutex::new(file)))
            .init(),
        (Some(file), false) => subscriber
            .with(fmt::layer().with_writer(std::sync::Mutex::new(file)).with_ansi(false))
            .init(),
        (None, true) => subscriber.with(fmt::layer().json()).init(),
        (None, false) => subscriber
            .with(fmt::layer().with_target(cli.verbose >= 2))
            .init(),
    }
}

/// Prints acknowledgments; optionally blocks until Enter.
pub struct ConsoleNotifier {
    pub wait: bool,
}

impl Notifier for ConsoleNotifier {
    fn acknowledge(&self, message: &str) {
        println!("{}", message);
        if self.wait {
            print!("[Enter] ");
            let _ = std::io::stdout().flush();
            let mut line = String::new();
            let _ = std::io::stdin().lock().read_line(&mut line);
        }
    }
}
