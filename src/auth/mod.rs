//! OAuth2 tokens and the authorization-server boundary.

pub mod error;
pub mod provider;
pub mod token;

pub use error::AuthError;
pub use provider::{AsanaProvider, AuthorizationOptions, Grant, OAuthProvider, ProviderToken};
pub use token::{AccessToken, TokenRecord};
