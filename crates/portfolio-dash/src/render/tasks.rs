use askama::Template;
use portfolio_types::Task;

use super::filters;
use super::helpers::{priority_label, status_label};
use super::{render_template, Fragment};

pub const NO_TASKS_MESSAGE: &str = "Brak zadań dla wybranego filtra";

struct TaskRow<'a> {
    id: i64,
    title: &'a str,
    status: &'a str,
    status_label: &'a str,
    priority: &'a str,
    priority_label: &'a str,
}

impl<'a> From<&'a Task> for TaskRow<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            id: task.id,
            title: &task.title,
            status: &task.status,
            status_label: status_label(&task.status),
            priority: &task.priority,
            priority_label: priority_label(&task.priority),
        }
    }
}

#[derive(Template)]
#[template(path = "tasks.html")]
struct TasksTemplate<'a> {
    tasks: Vec<TaskRow<'a>>,
    empty_message: &'static str,
}

/// One `task-item` per task, in the order given; a placeholder when empty.
pub fn render_tasks(tasks: &[Task]) -> Fragment {
    render_template(TasksTemplate {
        tasks: tasks.iter().map(TaskRow::from).collect(),
        empty_message: NO_TASKS_MESSAGE,
    })
}
