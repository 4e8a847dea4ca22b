//! Plain-text task list export.

use super::board::Board;
use crate::task::domain::Task;
use camino::Utf8Path;
use cap_std::fs_utf8::Dir;
use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

const EXPORT_TEMPLATE: &str = "Task list
{% for section in sections %}

{{ section.label }}
{% for task in section.tasks %}
[{{ \"x\" if task.done else \" \" }}] {{ task.title }}{% if task.due %} ({{ task.due }}){% endif %}

{% if task.tags %}
    [{{ task.tags | join(\", \") }}]
{% endif %}
{% endfor %}
{% endfor %}
";

/// Errors returned while exporting tasks.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The template failed to render.
    #[error("failed to render task export: {0}")]
    Render(#[from] minijinja::Error),

    /// The rendered list could not be written.
    #[error("failed to write task export to {path}: {source}")]
    Write {
        /// Target path relative to the export directory.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

#[derive(Serialize)]
struct ExportContext {
    sections: Vec<ExportSection>,
}

#[derive(Serialize)]
struct ExportSection {
    label: &'static str,
    tasks: Vec<ExportLine>,
}

#[derive(Serialize)]
struct ExportLine {
    title: String,
    done: bool,
    due: Option<String>,
    tags: Vec<String>,
}

impl From<&Task> for ExportLine {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title().to_string(),
            done: task.is_done(),
            due: task.due_date().map(|date| date.to_string()),
            tags: task.tags().iter().map(|tag| tag.name().to_string()).collect(),
        }
    }
}

/// Renders tasks as a checklist with one section per board column.
///
/// Within a section tasks keep their input order. Done tasks are ticked,
/// due dates follow the title and tags are listed on the next line.
///
/// # Errors
///
/// Returns [`ExportError::Render`] when the template fails to render.
pub fn render_task_export(tasks: &[Task]) -> Result<String, ExportError> {
    let board = Board::from_tasks(tasks);
    let sections = board
        .columns()
        .into_iter()
        .map(|(status, column)| ExportSection {
            label: status.label(),
            tasks: column.iter().map(ExportLine::from).collect(),
        })
        .collect();

    let mut environment = Environment::new();
    environment.set_trim_blocks(true);
    environment.set_lstrip_blocks(true);
    Ok(environment.render_str(EXPORT_TEMPLATE, ExportContext { sections })?)
}

/// Renders tasks and writes the list to `path` inside `dir`.
///
/// # Errors
///
/// Returns [`ExportError::Render`] when rendering fails and
/// [`ExportError::Write`] when the file cannot be written.
pub fn write_task_export(dir: &Dir, path: &Utf8Path, tasks: &[Task]) -> Result<(), ExportError> {
    let rendered = render_task_export(tasks)?;
    dir.write(path, rendered)
        .map_err(|source| ExportError::Write {
            path: path.to_string(),
            source,
        })
}
