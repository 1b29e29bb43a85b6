use super::dispatch::Dispatcher;
use crate::error::Result;
use crate::resources::User;

pub(crate) struct Users<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Users<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub(crate) async fn me(&self) -> Result<User> {
        self.dispatcher.get_one(&["users", "me"], Vec::new()).await
    }
}
