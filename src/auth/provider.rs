//! OAuth2 authorization-code and refresh-token exchange.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use strum::AsRefStr;
use tracing::debug;

use super::error::AuthError;
use crate::config::Credentials;

const ASANA_AUTHORIZE_URL: &str = "https://app.asana.com/-/oauth_authorize";
const ASANA_TOKEN_URL: &str = "https://app.asana.com/-/oauth_token";

/// Parameters for building an authorization redirect URL.
///
/// # Example
/// ```
/// use asana_client::auth::AuthorizationOptions;
///
/// let options = AuthorizationOptions {
///     scope: vec!["default".to_string()],
///     state: Some("somestate".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct AuthorizationOptions {
    pub scope: Vec<String>,
    /// Generated when `None`.
    pub state: Option<String>,
    /// Appended verbatim after the standard parameters.
    pub extra: Vec<(String, String)>,
}

/// Grant presented to the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Grant {
    AuthorizationCode(String),
    RefreshToken(String),
}

/// Token returned by a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderToken {
    pub access_token: String,
    /// The service omits this on refresh.
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

/// Authorization server the client delegates token exchanges to.
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Build the URL the user is redirected to for consent.
    fn authorization_url(&self, options: &AuthorizationOptions) -> String;

    /// Exchange a grant for a fresh token.
    async fn access_token(&self, grant: Grant) -> Result<ProviderToken, AuthError>;
}

/// Asana's OAuth2 authorization server.
///
/// # Example
/// ```no_run
/// use asana_client::auth::AsanaProvider;
/// use asana_client::config::Credentials;
///
/// let provider = AsanaProvider::new(Credentials {
///     client_id: "1".to_string(),
///     client_secret: "secret".to_string(),
///     redirect_uri: "https://example.com/callback".to_string(),
/// })?;
/// # Ok::<(), asana_client::auth::AuthError>(())
/// ```
pub struct AsanaProvider {
    client: reqwest::Client,
    credentials: Credentials,
    authorize_url: String,
    token_url: String,
}

impl std::fmt::Debug for AsanaProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsanaProvider")
            .field("client_id", &self.credentials.client_id)
            .field("redirect_uri", &self.credentials.redirect_uri)
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .finish()
    }
}

impl AsanaProvider {
    /// Fails when any of the client id, secret or redirect URI is empty.
    pub fn new(credentials: Credentials) -> Result<Self, AuthError> {
        let missing = credentials.missing_fields();
        if !missing.is_empty() {
            return Err(AuthError::MissingOptions(missing));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            credentials,
            authorize_url: ASANA_AUTHORIZE_URL.to_string(),
            token_url: ASANA_TOKEN_URL.to_string(),
        })
    }

    pub fn with_authorize_url(mut self, url: impl Into<String>) -> Self {
        self.authorize_url = url.into();
        self
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }
}

#[async_trait]
impl OAuthProvider for AsanaProvider {
    fn authorization_url(&self, options: &AuthorizationOptions) -> String {
        let state = options.state.clone().unwrap_or_else(|| random_hex(16));
        let scope = options.scope.join(" ");

        let mut params: Vec<(&str, &str)> = vec![
            ("client_id", self.credentials.client_id.as_str()),
            ("redirect_uri", self.credentials.redirect_uri.as_str()),
            ("response_type", "code"),
            ("state", state.as_str()),
        ];
        if !scope.is_empty() {
            params.push(("scope", scope.as_str()));
        }
        params.extend(options.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        build_url_with_params(&self.authorize_url, &params)
    }

    async fn access_token(&self, grant: Grant) -> Result<ProviderToken, AuthError> {
        let mut form = vec![
            ("grant_type", grant.as_ref()),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("redirect_uri", self.credentials.redirect_uri.as_str()),
        ];
        match &grant {
            Grant::AuthorizationCode(code) => form.push(("code", code.as_str())),
            Grant::RefreshToken(token) => {
                if token.is_empty() {
                    return Err(AuthError::NoRefreshToken);
                }
                form.push(("refresh_token", token.as_str()));
            }
        }

        debug!(grant_type = grant.as_ref(), "requesting access token");

        let resp = self
            .client
            .post(&self.token_url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .form(&form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::InvalidResponse(format!(
                "Token exchange failed with status {status}: {body}"
            )));
        }

        let payload: TokenExchangeResponse = resp.json().await?;
        token_from_exchange_response(payload)
    }
}

#[derive(Debug, Deserialize)]
struct TokenExchangeResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: i64,
}

fn token_from_exchange_response(
    payload: TokenExchangeResponse,
) -> Result<ProviderToken, AuthError> {
    let expires_at = Duration::try_seconds(payload.expires_in)
        .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
        .ok_or_else(|| AuthError::InvalidResponse("expires_in out of range".to_string()))?;

    Ok(ProviderToken {
        access_token: payload.access_token,
        refresh_token: payload.refresh_token,
        expires_at,
    })
}

fn random_hex(byte_count: usize) -> String {
    let mut buf = vec![0u8; byte_count];
    for chunk in buf.chunks_mut(16) {
        let id = uuid::Uuid::new_v4();
        let len = chunk.len();
        chunk.copy_from_slice(&id.as_bytes()[..len]);
    }
    buf.iter().map(|byte| format!("{byte:02x}")).collect()
}

fn build_url_with_params(base: &str, params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoded(key), urlencoded(value)))
        .collect::<Vec<_>>()
        .join("&");
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{query}")
}

fn urlencoded(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
