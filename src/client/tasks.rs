use serde_json::{json, Value};

use super::dispatch::{unwrap_one, Dispatcher};
use crate::error::Result;
use crate::http::{Method, RequestBody};
use crate::resources::Task;

pub(crate) struct Tasks<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Tasks<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    fn fields(&self) -> Vec<(String, String)> {
        vec![(
            "opt_fields".to_string(),
            self.dispatcher.options().task_fields.clone(),
        )]
    }

    pub(crate) async fn list(&self, project_gid: &str) -> Result<Vec<Task>> {
        self.dispatcher
            .get_list(&["projects", project_gid, "tasks"], self.fields())
            .await
    }

    pub(crate) async fn get(&self, gid: &str) -> Result<Task> {
        self.dispatcher
            .get_one(&["tasks", gid], self.fields())
            .await
    }

    pub(crate) async fn create(&self, task: &Task, project_gid: Option<&str>) -> Result<Task> {
        let payload = json!({ "data": Value::Object(task.to_wire(project_gid)) });
        let body = self
            .dispatcher
            .send(Method::Post, &["tasks"], self.fields(), RequestBody::Json(payload))
            .await?;
        unwrap_one(&body)
    }

    pub(crate) async fn update(&self, gid: &str, task: &Task) -> Result<Task> {
        let payload = json!({ "data": Value::Object(task.to_wire(None)) });
        let body = self
            .dispatcher
            .send(
                Method::Put,
                &["tasks", gid],
                self.fields(),
                RequestBody::Json(payload),
            )
            .await?;
        unwrap_one(&body)
    }
}
