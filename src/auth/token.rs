use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Tokens are treated as expired this many seconds before their real expiry.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// OAuth access token held by the client.
///
/// Immutable once built; a refresh produces a new value. The default value
/// (empty strings, epoch expiry) stands for "no token yet".
///
/// # Example
/// ```
/// use asana_client::auth::AccessToken;
/// use chrono::{Duration, Utc};
///
/// let token = AccessToken::new("access", "refresh", Utc::now() + Duration::hours(1));
/// assert!(!token.expired());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at,
        }
    }

    /// True when fewer than [`EXPIRY_MARGIN_SECS`] seconds remain.
    pub fn expired(&self) -> bool {
        self.expired_at(Utc::now())
    }

    /// Expiry check against an explicit clock reading.
    pub fn expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - now < Duration::seconds(EXPIRY_MARGIN_SECS)
    }

    /// Whether this is the "no token yet" placeholder.
    pub fn is_empty(&self) -> bool {
        self.access_token.is_empty()
    }

    pub fn to_record(&self) -> TokenRecord {
        TokenRecord {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
            expires_in: self.expires_at.timestamp(),
        }
    }
}

/// Persistence shape of an [`AccessToken`].
///
/// `expires_in` holds the absolute expiry as a unix timestamp, not a
/// duration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: i64,
}

impl From<TokenRecord> for AccessToken {
    fn from(record: TokenRecord) -> Self {
        Self {
            access_token: record.access_token,
            refresh_token: record.refresh_token,
            expires_at: DateTime::<Utc>::from_timestamp(record.expires_in, 0).unwrap_or_default(),
        }
    }
}
