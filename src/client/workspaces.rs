use super::dispatch::Dispatcher;
use crate::error::Result;
use crate::resources::Workspace;

pub(crate) struct Workspaces<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Workspaces<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub(crate) async fn list(&self) -> Result<Vec<Workspace>> {
        self.dispatcher.get_list(&["workspaces"], Vec::new()).await
    }

    pub(crate) async fn get(&self, gid: &str) -> Result<Workspace> {
        self.dispatcher
            .get_one(&["workspaces", gid], Vec::new())
            .await
    }
}
