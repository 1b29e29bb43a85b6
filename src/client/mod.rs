//! The Asana API client.
//!
//! [`Client`] owns the current [`AccessToken`] and a lazily created
//! [`Transport`]. Each resource family (workspaces, projects, tasks,
//! attachments, users) lives in its own module and borrows the shared
//! dispatcher; the client composes them behind one flat API.
//!
//! Every network operation checks the token first: no token fails with
//! [`AsanaError::Unauthorized`], a stale one with
//! [`AsanaError::TokenExpired`], in both cases before a request is built.

mod attachments;
mod dispatch;
mod projects;
mod tasks;
mod users;
mod workspaces;

use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use self::attachments::Attachments;
use self::dispatch::Dispatcher;
use self::projects::Projects;
use self::tasks::Tasks;
use self::users::Users;
use self::workspaces::Workspaces;
use crate::auth::{AccessToken, AsanaProvider, AuthorizationOptions, Grant, OAuthProvider};
use crate::config::{ClientOptions, Credentials};
use crate::error::{AsanaError, Result};
use crate::http::Transport;
use crate::resources::{Attachment, Project, Task, User, Workspace};

/// Asana API client.
///
/// # Example
/// ```no_run
/// use asana_client::auth::AccessToken;
/// use asana_client::config::{ClientOptions, Credentials};
/// use asana_client::Client;
///
/// # async fn example(token: AccessToken) -> asana_client::error::Result<()> {
/// let client = Client::from_credentials(
///     Credentials::from_env(),
///     Some(token),
///     ClientOptions::default(),
/// )?;
/// for workspace in client.workspaces().await? {
///     println!("{} {}", workspace.gid, workspace.name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Client {
    provider: Arc<dyn OAuthProvider>,
    dispatcher: Dispatcher,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("options", self.dispatcher.options())
            .field("authenticated", &self.dispatcher.current_token().is_some())
            .finish()
    }
}

impl Client {
    pub fn new(
        provider: Arc<dyn OAuthProvider>,
        token: Option<AccessToken>,
        options: ClientOptions,
    ) -> Self {
        Self {
            provider,
            dispatcher: Dispatcher::new(options, token),
        }
    }

    /// Client backed by [`AsanaProvider`]; fails when a credential is empty.
    pub fn from_credentials(
        credentials: Credentials,
        token: Option<AccessToken>,
        options: ClientOptions,
    ) -> Result<Self> {
        let provider = AsanaProvider::new(credentials)?;
        Ok(Self::new(Arc::new(provider), token, options))
    }

    /// Use `transport` instead of the default `reqwest` one.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.dispatcher.set_transport(transport);
        self
    }

    pub fn options(&self) -> &ClientOptions {
        self.dispatcher.options()
    }

    /// Current token, if any.
    pub fn token(&self) -> Option<AccessToken> {
        self.dispatcher.current_token()
    }

    /// Whether the current token is inside its expiry margin. Also true
    /// when no token is held.
    pub fn token_expired(&self) -> bool {
        self.dispatcher
            .current_token()
            .map_or(true, |token| token.expired())
    }

    pub fn authorization_url(&self, options: &AuthorizationOptions) -> String {
        self.provider.authorization_url(options)
    }

    /// Exchange an authorization code for a token and keep it.
    ///
    /// Provider failures are returned as [`AsanaError::Auth`].
    pub async fn fetch_token(&self, code: &str) -> Result<AccessToken> {
        let issued = self
            .provider
            .access_token(Grant::AuthorizationCode(code.to_string()))
            .await?;

        let token = AccessToken::new(
            issued.access_token,
            issued.refresh_token.unwrap_or_default(),
            issued.expires_at,
        );
        self.dispatcher.replace_token(token.clone());
        Ok(token)
    }

    /// Exchange the stored refresh token for a new token and keep it.
    ///
    /// Fails with [`AsanaError::Unauthorized`] when no token is held or the
    /// exchange is rejected.
    pub async fn refresh_token(&self) -> Result<AccessToken> {
        let current = self
            .dispatcher
            .current_token()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AsanaError::Unauthorized("no token to refresh".to_string()))?;

        let issued = self
            .provider
            .access_token(Grant::RefreshToken(current.refresh_token.clone()))
            .await
            .map_err(|err| {
                warn!(error = %err, "token refresh failed");
                AsanaError::Unauthorized(err.to_string())
            })?;

        let token = AccessToken::new(
            issued.access_token,
            issued.refresh_token.unwrap_or(current.refresh_token),
            issued.expires_at,
        );
        self.dispatcher.replace_token(token.clone());
        Ok(token)
    }

    pub async fn workspaces(&self) -> Result<Vec<Workspace>> {
        Workspaces::new(&self.dispatcher).list().await
    }

    pub async fn workspace(&self, gid: &str) -> Result<Workspace> {
        Workspaces::new(&self.dispatcher).get(gid).await
    }

    /// Projects of a workspace.
    pub async fn projects(&self, workspace_gid: &str) -> Result<Vec<Project>> {
        Projects::new(&self.dispatcher).list(workspace_gid).await
    }

    pub async fn project(&self, gid: &str) -> Result<Project> {
        Projects::new(&self.dispatcher).get(gid).await
    }

    /// Tasks of a project.
    pub async fn tasks(&self, project_gid: &str) -> Result<Vec<Task>> {
        Tasks::new(&self.dispatcher).list(project_gid).await
    }

    pub async fn task(&self, gid: &str) -> Result<Task> {
        Tasks::new(&self.dispatcher).get(gid).await
    }

    /// Create `task`, in `project_gid` when given, otherwise in the
    /// task's own project.
    pub async fn create_task(&self, task: &Task, project_gid: Option<&str>) -> Result<Task> {
        Tasks::new(&self.dispatcher).create(task, project_gid).await
    }

    pub async fn update_task(&self, gid: &str, task: &Task) -> Result<Task> {
        Tasks::new(&self.dispatcher).update(gid, task).await
    }

    /// Upload the file at `path` to a task.
    pub async fn add_attachment(
        &self,
        path: impl AsRef<Path>,
        task_gid: &str,
    ) -> Result<Attachment> {
        Attachments::new(&self.dispatcher)
            .upload(path.as_ref(), task_gid)
            .await
    }

    /// The user the token belongs to.
    pub async fn me(&self) -> Result<User> {
        Users::new(&self.dispatcher).me().await
    }
}
