//! Asana API client.
//!
//! Wraps the Asana REST API: OAuth2 token lifecycle, authenticated request
//! dispatch with feature-negotiation headers, status-code to error mapping,
//! and validated conversion between wire records and typed resources.
//!
//! # Quick Start
//!
//! ```no_run
//! use asana_client::prelude::*;
//!
//! # async fn example() -> asana_client::error::Result<()> {
//! let client = Client::from_credentials(Credentials::from_env(), None, ClientOptions::from_env())?;
//! let url = client.authorization_url(&AuthorizationOptions::default());
//! println!("visit {url}");
//!
//! let token = client.fetch_token("code-from-redirect").await?;
//! let task = Task::builder().name("Write docs").notes("").build();
//! let created = client.create_task(&task, Some("1200000000000")).await?;
//! println!("{:?} valid until {}", created.gid, token.expires_at);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod prelude;
pub mod resources;
pub mod validator;

pub use client::Client;
