#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use asana_client::auth::{
    AccessToken, AuthError, AuthorizationOptions, Grant, OAuthProvider, ProviderToken,
};
use asana_client::config::ClientOptions;
use asana_client::error::Result;
use asana_client::http::{HttpRequest, HttpResponse, Transport};
use asana_client::Client;

/// Transport that records requests and replays queued responses.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<HttpResponse>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .expect("responses lock poisoned")
            .push_back(HttpResponse::new(status, body));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("requests lock poisoned").clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push(request);
        Ok(self
            .responses
            .lock()
            .expect("responses lock poisoned")
            .pop_front()
            .unwrap_or_else(|| HttpResponse::new(200, r#"{"data":[]}"#)))
    }
}

/// Provider returning a canned outcome and recording grants.
pub struct StubProvider {
    grants: Mutex<Vec<Grant>>,
    outcome: Mutex<Option<std::result::Result<ProviderToken, AuthError>>>,
}

impl StubProvider {
    pub fn issuing(token: ProviderToken) -> Self {
        Self {
            grants: Mutex::new(Vec::new()),
            outcome: Mutex::new(Some(Ok(token))),
        }
    }

    pub fn failing(error: AuthError) -> Self {
        Self {
            grants: Mutex::new(Vec::new()),
            outcome: Mutex::new(Some(Err(error))),
        }
    }

    pub fn grants(&self) -> Vec<Grant> {
        self.grants.lock().expect("grants lock poisoned").clone()
    }
}

#[async_trait]
impl OAuthProvider for StubProvider {
    fn authorization_url(&self, options: &AuthorizationOptions) -> String {
        format!(
            "https://asana.authorization.url?state={}",
            options.state.clone().unwrap_or_default()
        )
    }

    async fn access_token(&self, grant: Grant) -> std::result::Result<ProviderToken, AuthError> {
        self.grants.lock().expect("grants lock poisoned").push(grant);
        self.outcome
            .lock()
            .expect("outcome lock poisoned")
            .take()
            .unwrap_or(Err(AuthError::InvalidResponse("no outcome queued".into())))
    }
}

pub fn provider_token(access: &str, refresh: Option<&str>) -> ProviderToken {
    ProviderToken {
        access_token: access.to_string(),
        refresh_token: refresh.map(str::to_string),
        expires_at: Utc::now() + Duration::hours(1),
    }
}

pub fn valid_token() -> AccessToken {
    AccessToken::new("12345", "67890", Utc::now() + Duration::hours(1))
}

pub fn expired_token() -> AccessToken {
    AccessToken::new("12345", "67890", Utc::now() - Duration::seconds(60))
}

/// Client with a stub provider and a recording transport.
pub fn recording_client(
    token: Option<AccessToken>,
) -> (Client, Arc<RecordingTransport>, Arc<StubProvider>) {
    let transport = Arc::new(RecordingTransport::new());
    let provider = Arc::new(StubProvider::issuing(provider_token("new-access", None)));
    let client = Client::new(provider.clone(), token, ClientOptions::default())
        .with_transport(transport.clone());
    (client, transport, provider)
}

/// Client talking to a wiremock server through the default transport.
pub fn server_client(base_url: &str) -> Client {
    let options = ClientOptions::builder()
        .base_url(base_url)
        .enable_features(vec!["new_user_task_lists".to_string()])
        .build();
    let provider = Arc::new(StubProvider::issuing(provider_token("new-access", None)));
    Client::new(provider, Some(valid_token()), options)
}
