//! Client configuration (explicit values > env vars > built-in defaults).

use bon::Builder;

pub const DEFAULT_BASE_URL: &str = "https://app.asana.com/api/1.0";

/// Fields requested for every task read or written.
pub const DEFAULT_TASK_FIELDS: &str = "name,notes,html_notes,completed,projects.gid";

const DEFAULT_ENABLED_FEATURES: &[&str] = &["new_user_task_lists", "new_goal_memberships"];
const DEFAULT_DISABLED_FEATURES: &[&str] = &["new_sections"];

/// OAuth application credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl Credentials {
    /// Load from `ASANA_CLIENT_ID`, `ASANA_CLIENT_SECRET` and
    /// `ASANA_REDIRECT_URI`, reading `.env` first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            client_id: lookup("ASANA_CLIENT_ID").unwrap_or_default(),
            client_secret: lookup("ASANA_CLIENT_SECRET").unwrap_or_default(),
            redirect_uri: lookup("ASANA_REDIRECT_URI").unwrap_or_default(),
        }
    }

    /// Names of the required options left empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("clientId", &self.client_id),
            ("clientSecret", &self.client_secret),
            ("redirectUri", &self.redirect_uri),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Request-shaping options for [`crate::Client`].
///
/// Feature lists are opaque to the client; they are sent comma-joined in
/// the `asana-enable` / `asana-disable` headers of every request.
///
/// # Example
/// ```
/// use asana_client::config::ClientOptions;
///
/// let options = ClientOptions::builder()
///     .base_url("http://localhost:8080")
///     .disable_features(Vec::new())
///     .build();
/// assert!(options.disable_features.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct ClientOptions {
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    pub base_url: String,
    #[builder(default = to_owned_list(DEFAULT_ENABLED_FEATURES))]
    pub enable_features: Vec<String>,
    #[builder(default = to_owned_list(DEFAULT_DISABLED_FEATURES))]
    pub disable_features: Vec<String>,
    #[builder(into, default = DEFAULT_TASK_FIELDS.to_string())]
    pub task_fields: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            enable_features: to_owned_list(DEFAULT_ENABLED_FEATURES),
            disable_features: to_owned_list(DEFAULT_DISABLED_FEATURES),
            task_fields: DEFAULT_TASK_FIELDS.to_string(),
        }
    }
}

impl ClientOptions {
    /// Defaults overridden by `ASANA_BASE_URL`, `ASANA_ENABLE` and
    /// `ASANA_DISABLE` (comma-separated), reading `.env` first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();
        if let Some(url) = lookup("ASANA_BASE_URL") {
            options.base_url = url;
        }
        if let Some(list) = lookup("ASANA_ENABLE") {
            options.enable_features = split_list(&list);
        }
        if let Some(list) = lookup("ASANA_DISABLE") {
            options.disable_features = split_list(&list);
        }
        options
    }

    pub fn enable_header(&self) -> String {
        self.enable_features.join(",")
    }

    pub fn disable_header(&self) -> String {
        self.disable_features.join(",")
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
