use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::sealed::Build;
use super::FromWire;
use crate::error::{AsanaError, Result};
use crate::validator::{bool_field_or, optional_string_field, string_field, WireRecord};

/// A task, either fetched from the service or about to be created.
///
/// # Example
/// ```
/// use asana_client::resources::Task;
///
/// let task = Task::builder()
///     .name("Task")
///     .notes("Notes")
///     .project_gid("10")
///     .build();
/// assert!(!task.completed);
/// assert!(task.gid.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct Task {
    #[builder(into)]
    pub gid: Option<String>,
    #[builder(default)]
    pub completed: bool,
    #[builder(into)]
    pub name: String,
    #[builder(into)]
    pub notes: String,
    /// First project the task belongs to.
    #[builder(into)]
    pub project_gid: Option<String>,
}

impl Task {
    /// Payload sent when creating or updating the task.
    ///
    /// `project_gid` takes precedence over the one stored on the task. Notes
    /// are always wrapped in `<body>` tags, whatever they already contain.
    pub fn to_wire(&self, project_gid: Option<&str>) -> WireRecord {
        let projects: Vec<&str> = project_gid
            .or(self.project_gid.as_deref())
            .into_iter()
            .collect();

        let mut record = WireRecord::new();
        record.insert("completed".into(), Value::Bool(self.completed));
        record.insert("projects".into(), json!(projects));
        record.insert("name".into(), Value::String(self.name.clone()));
        record.insert(
            "html_notes".into(),
            Value::String(format!("<body>{}</body>", self.notes)),
        );
        record
    }
}

impl FromWire for Task {
    const REQUIRED_KEYS: &'static [&'static str] = &["name"];
}

impl Build for Task {
    fn build(record: &WireRecord) -> Result<Self> {
        // Plain notes when the service sent them, otherwise the rich-text
        // form verbatim.
        let notes = if record.contains_key("notes") {
            string_field(record, "notes")?
        } else if record.contains_key("html_notes") {
            string_field(record, "html_notes")?
        } else {
            return Err(AsanaError::invalid_data(record));
        };

        Ok(Self {
            gid: optional_string_field(record, "gid")?,
            completed: bool_field_or(record, "completed", false)?,
            name: string_field(record, "name")?,
            notes,
            project_gid: first_project_gid(record)?,
        })
    }
}

/// Projects arrive as `[{"gid": ..}]` from the service and as bare gid
/// strings in outgoing payloads.
fn first_project_gid(record: &WireRecord) -> Result<Option<String>> {
    let first = match record.get("projects") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(projects)) => projects.first(),
        Some(_) => return Err(AsanaError::invalid_data(record)),
    };

    match first {
        None => Ok(None),
        Some(Value::String(gid)) => Ok(Some(gid.clone())),
        Some(Value::Object(project)) => optional_string_field(project, "gid"),
        Some(_) => Err(AsanaError::invalid_data(record)),
    }
}
