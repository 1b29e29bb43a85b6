//! Authenticated request dispatch shared by every resource family.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use crate::auth::AccessToken;
use crate::config::ClientOptions;
use crate::error::{AsanaError, Result};
use crate::http::{into_result, HttpRequest, Method, ReqwestTransport, RequestBody, Transport};
use crate::resources::FromWire;
use crate::validator::as_record;

/// Owns the current token and the (lazily created) transport.
pub(crate) struct Dispatcher {
    options: ClientOptions,
    token: RwLock<Option<AccessToken>>,
    transport: OnceLock<Arc<dyn Transport>>,
}

impl Dispatcher {
    pub(crate) fn new(options: ClientOptions, token: Option<AccessToken>) -> Self {
        Self {
            options,
            token: RwLock::new(token),
            transport: OnceLock::new(),
        }
    }

    pub(crate) fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.transport = OnceLock::from(transport);
    }

    pub(crate) fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub(crate) fn current_token(&self) -> Option<AccessToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a new token; readers see either the old or the new one.
    pub(crate) fn replace_token(&self, token: AccessToken) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Bearer token for the next request, or why there is none.
    pub(crate) fn authorize(&self) -> Result<String> {
        let token = self
            .current_token()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AsanaError::Unauthorized("no access token".to_string()))?;
        if token.expired() {
            return Err(AsanaError::TokenExpired);
        }
        Ok(token.access_token)
    }

    fn transport(&self) -> &Arc<dyn Transport> {
        self.transport
            .get_or_init(|| Arc::new(ReqwestTransport::default()))
    }

    /// Endpoint URL with each segment percent-encoded on its own, so an id
    /// can never reach a different path.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        if let Some(segment) = segments
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            return Err(AsanaError::InvalidIdentifier((*segment).to_string()));
        }

        let mut url = Url::parse(&self.options.base_url).map_err(|err| {
            AsanaError::Configuration(format!("invalid base url {}: {err}", self.options.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                AsanaError::Configuration(format!(
                    "base url {} cannot carry a path",
                    self.options.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn send(
        &self,
        method: Method,
        segments: &[&str],
        query: Vec<(String, String)>,
        body: RequestBody,
    ) -> Result<Value> {
        let access_token = self.authorize()?;
        let url = self.url(segments)?;
        let path = url.path().to_string();

        let request = HttpRequest {
            method,
            url: url.into(),
            headers: vec![
                ("Authorization".to_string(), format!("Bearer {access_token}")),
                ("Accept".to_string(), "application/json".to_string()),
                ("asana-enable".to_string(), self.options.enable_header()),
                ("asana-disable".to_string(), self.options.disable_header()),
            ],
            query,
            body,
        };

        debug!(method = %method, path = %path, "asana request");
        let response = self.transport().send(request).await?;
        debug!(method = %method, path = %path, status = response.status, "asana response");

        into_result(response)
    }

    pub(crate) async fn get_list<R: FromWire>(
        &self,
        segments: &[&str],
        query: Vec<(String, String)>,
    ) -> Result<Vec<R>> {
        let body = self
            .send(Method::Get, segments, query, RequestBody::Empty)
            .await?;
        unwrap_list(&body)
    }

    pub(crate) async fn get_one<R: FromWire>(
        &self,
        segments: &[&str],
        query: Vec<(String, String)>,
    ) -> Result<R> {
        let body = self
            .send(Method::Get, segments, query, RequestBody::Empty)
            .await?;
        unwrap_one(&body)
    }
}

/// Items of the `data` envelope of a list response.
pub(crate) fn unwrap_list<R: FromWire>(body: &Value) -> Result<Vec<R>> {
    let items = body
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| AsanaError::InvalidData {
            record: body.clone(),
        })?;

    items
        .iter()
        .map(|item| R::from_wire(as_record(item)?))
        .collect()
}

/// The `data` object of a single-resource response, or the body itself
/// when it carries no envelope.
pub(crate) fn unwrap_one<R: FromWire>(body: &Value) -> Result<R> {
    let record = match body.get("data") {
        Some(data @ Value::Object(_)) => data,
        _ => body,
    };
    R::from_wire(as_record(record)?)
}
