// # WAPI HTTP Connector
//
// This crate implements `ibx_core::Connector` over the appliance's WAPI REST
// interface.
//
// ## Behaviour
//
// - One HTTP request per primitive operation
// - Full error propagation; no retry, no backoff, no caching
// - HTTP timeout taken from `ConnectorConfig::http_timeout_secs`
// - Status codes mapped onto `ibx_core::Error` (401, 403, 404, 409, other)
// - `_return_as_object=1` on every request, so responses are `{"result": ...}`
//
// ## Security Requirements
//
// - The password NEVER appears in logs or `Debug` output
// - Credentials travel as HTTP basic auth only
//
// ## API Reference
//
// - Create: POST `<type>?_return_fields+=...`
// - Read: GET `<ref>` or GET `<type>?<field>=<value>&...`
// - Update: PUT `<ref>?_return_fields+=...`
// - Delete: DELETE `<ref>`

use async_trait::async_trait;
use ibx_core::config::ConnectorConfig;
use ibx_core::{Connector, Error, QueryParams, Result, WapiObject};
use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Query parameter asking WAPI to wrap every result in `{"result": ...}`
const RETURN_AS_OBJECT: (&str, &str) = ("_return_as_object", "1");

/// Response envelope produced by `_return_as_object=1`
#[derive(Deserialize)]
struct ResultEnvelope<T> {
    result: T,
}

/// Error body WAPI returns with non-success statuses
#[derive(Deserialize, Default)]
struct WapiErrorBody {
    #[serde(rename = "Error", default)]
    error: String,
    #[serde(default)]
    code: String,
    #[serde(default)]
    text: String,
}

/// HTTP connector for the WAPI interface
///
/// Holds a single `reqwest::Client`; clones of the connector are not needed
/// to share it across tasks, a reference is enough.
pub struct WapiConnector {
    /// Base URL ending in `/`, e.g. `https://gm:443/wapi/v2.11/`
    base_url: String,

    username: String,

    /// ⚠️ NEVER log this value
    password: String,

    client: reqwest::Client,
}

// Custom Debug implementation that hides the password
impl std::fmt::Debug for WapiConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WapiConnector")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

impl WapiConnector {
    /// Create a connector for the appliance described by `config`
    ///
    /// # Returns
    ///
    /// - `Ok(WapiConnector)`: Ready to use; no request has been made yet
    /// - `Err(Error::Config)`: The configuration is invalid
    /// - `Err(Error::Http)`: The HTTP client could not be built
    pub fn new(config: &ConnectorConfig) -> Result<Self> {
        Self::with_base_url(config, config.base_url())
    }

    /// Create a connector that sends requests to `base_url` instead of the
    /// URL derived from `config`
    ///
    /// Credentials, timeout and certificate checking still come from `config`.
    pub fn with_base_url(config: &ConnectorConfig, base_url: impl Into<String>) -> Result<Self> {
        config.validate()?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        if !config.ssl_verify {
            tracing::warn!("TLS certificate verification is disabled for {}", config.host);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .danger_accept_invalid_certs(!config.ssl_verify)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            username: config.username.clone(),
            password: config.password.clone(),
            client,
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an object type or reference
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Authenticate, send, map the status and unwrap `{"result": ...}`
    async fn send<R: DeserializeOwned>(&self, request: RequestBuilder, operation: &str) -> Result<R> {
        let response = request
            .basic_auth(&self.username, Some(&self.password))
            .query(&[RETURN_AS_OBJECT])
            .send()
            .await
            .map_err(|e| Error::http(format!("{} request failed: {}", operation, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::http(format!("Failed to read {} response: {}", operation, e)))?;

        if !status.is_success() {
            tracing::debug!("{} failed with status {}", operation, status);
            return Err(status_error(status, &body));
        }

        let envelope: ResultEnvelope<R> = serde_json::from_str(&body)?;
        Ok(envelope.result)
    }
}

/// Map a non-success response onto an error
///
/// The message is WAPI's `text` when the body carries one, otherwise its
/// `Error` field, otherwise the raw body.
fn status_error(status: StatusCode, body: &str) -> Error {
    let parsed: WapiErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = if !parsed.text.is_empty() {
        parsed.text
    } else if !parsed.error.is_empty() {
        parsed.error
    } else if !body.trim().is_empty() {
        body.trim().to_string()
    } else {
        status.to_string()
    };

    match status {
        StatusCode::UNAUTHORIZED => Error::auth(message),
        StatusCode::FORBIDDEN => Error::access_denied(message),
        StatusCode::NOT_FOUND => Error::not_found(message),
        StatusCode::CONFLICT => Error::conflict(message),
        _ => {
            let code = if parsed.code.is_empty() {
                format!("HTTP {}", status.as_u16())
            } else {
                parsed.code
            };
            Error::wapi(code, message)
        }
    }
}

#[async_trait]
impl Connector for WapiConnector {
    async fn create_object<T: WapiObject>(&self, object: &T) -> Result<T> {
        let body = object.to_request_body()?;
        let request = self
            .client
            .post(self.url(T::OBJECT_TYPE))
            .query(&QueryParams::new(false).to_query_pairs(T::RETURN_FIELDS))
            .json(&body);

        tracing::debug!("POST {} {}", T::OBJECT_TYPE, body);
        let created: T = self.send(request, "create").await?;
        tracing::info!("Created {} {}", T::OBJECT_TYPE, created.reference());
        Ok(created)
    }

    async fn get_object<T: WapiObject>(&self, reference: &str, params: &QueryParams) -> Result<T> {
        let request = self
            .client
            .get(self.url(reference))
            .query(&params.to_query_pairs(T::RETURN_FIELDS));

        tracing::debug!("GET {}", reference);
        self.send(request, "get").await
    }

    async fn get_objects<T: WapiObject>(&self, params: &QueryParams) -> Result<Vec<T>> {
        let request = self
            .client
            .get(self.url(T::OBJECT_TYPE))
            .query(&params.to_query_pairs(T::RETURN_FIELDS));

        tracing::debug!("GET {} {:?}", T::OBJECT_TYPE, params.search_fields());
        self.send(request, "search").await
    }

    async fn update_object<T: WapiObject>(&self, object: &T, reference: &str) -> Result<T> {
        let body = object.to_request_body()?;
        let request = self
            .client
            .put(self.url(reference))
            .query(&QueryParams::new(false).to_query_pairs(T::RETURN_FIELDS))
            .json(&body);

        tracing::debug!("PUT {} {}", reference, body);
        let updated: T = self.send(request, "update").await?;
        tracing::info!("Updated {} -> {}", reference, updated.reference());
        Ok(updated)
    }

    async fn delete_object(&self, reference: &str) -> Result<String> {
        let request = self.client.delete(self.url(reference));

        tracing::debug!("DELETE {}", reference);
        let deleted: String = self.send(request, "delete").await?;
        tracing::info!("Deleted {}", deleted);
        Ok(deleted)
    }
}
