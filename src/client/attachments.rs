use std::path::Path;

use super::dispatch::{unwrap_one, Dispatcher};
use crate::error::Result;
use crate::http::{guess_content_type, Method, MultipartFile, RequestBody};
use crate::resources::Attachment;

pub(crate) struct Attachments<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Attachments<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub(crate) async fn upload(&self, path: &Path, task_gid: &str) -> Result<Attachment> {
        // Token problems win over filesystem problems.
        self.dispatcher.authorize()?;

        let content = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = MultipartFile {
            field: "file".to_string(),
            content_type: guess_content_type(&filename).to_string(),
            filename,
            content,
        };

        let body = self
            .dispatcher
            .send(
                Method::Post,
                &["tasks", task_gid, "attachments"],
                Vec::new(),
                RequestBody::Multipart(file),
            )
            .await?;
        unwrap_one(&body)
    }
}
