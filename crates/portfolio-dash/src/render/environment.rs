use askama::Template;
use portfolio_types::EnvironmentInfo;

use super::{render_template, Fragment};

#[derive(Template)]
#[template(path = "environment.html")]
struct EnvironmentTemplate<'a> {
    info: &'a EnvironmentInfo,
}

pub fn render_environment_info(info: &EnvironmentInfo) -> Fragment {
    render_template(EnvironmentTemplate { info })
}
