//! Convenience re-exports.

pub use crate::auth::{AccessToken, AuthorizationOptions, OAuthProvider, TokenRecord};
pub use crate::client::Client;
pub use crate::config::{ClientOptions, Credentials};
pub use crate::error::{AsanaError, ErrorCategory, RecoverySuggestion, Result};
pub use crate::resources::{Attachment, Project, Task, User, Workspace};
