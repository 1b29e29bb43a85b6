use super::dispatch::Dispatcher;
use crate::error::Result;
use crate::resources::Project;

pub(crate) struct Projects<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Projects<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub(crate) async fn list(&self, workspace_gid: &str) -> Result<Vec<Project>> {
        self.dispatcher
            .get_list(&["workspaces", workspace_gid, "projects"], Vec::new())
            .await
    }

    pub(crate) async fn get(&self, gid: &str) -> Result<Project> {
        self.dispatcher
            .get_one(&["projects", gid], Vec::new())
            .await
    }
}
