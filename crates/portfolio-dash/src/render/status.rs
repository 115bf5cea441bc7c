use askama::Template;
use chrono::{Local, TimeZone};
use portfolio_types::AppStatus;

use super::helpers::format_timestamp_in;
use super::{render_template, Fragment};

#[derive(Template)]
#[template(path = "status.html")]
struct StatusTemplate<'a> {
    hostname: &'a str,
    version: &'a str,
    environment: &'a str,
    updated: String,
    uptime: Option<&'a str>,
}

pub fn render_app_status(status: &AppStatus) -> Fragment {
    render_app_status_in(status, &Local)
}

/// Same as [`render_app_status`] with the timestamp shown in `tz`.
pub fn render_app_status_in<Tz>(status: &AppStatus, tz: &Tz) -> Fragment
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    render_template(StatusTemplate {
        hostname: &status.hostname,
        version: &status.version,
        environment: &status.environment,
        updated: format_timestamp_in(&status.timestamp, tz),
        uptime: status.uptime.as_deref(),
    })
}
