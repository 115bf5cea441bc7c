#![forbid(unsafe_code)]
#![warn(clippy::all)]

//! Portfolio dashboard.
//!
//! Polls the backend's status, task and environment endpoints and renders
//! each into its own region of an HTML page. One load failing only ever
//! replaces its own region with an error message.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod render;
pub mod surface;

#[cfg(test)]
mod testing;

pub use api::{ApiRequest, Backend, HttpBackend};
pub use app::{Dashboard, DashboardSettings, FilterState, RefreshHandle, TaskTicket};
pub use config::DashConfig;
pub use render::{Container, Fragment, PageShell};
pub use surface::{FileSurface, PageSurface, Surface};
