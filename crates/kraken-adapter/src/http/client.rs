/*
[INPUT]:  HTTP configuration (base URL, timeouts, API credentials)
[OUTPUT]: Configured reqwest client ready for public and signed private calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::http::signature::RequestSigner;
use crate::http::{KrakenError, Result};

/// Base URL for the REST API
const API_BASE_URL: &str = "https://api.kraken.com";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Credentials for private endpoints
#[derive(Debug)]
pub struct Credentials {
    api_key: String,
    signer: RequestSigner,
}

impl Credentials {
    /// Create credentials from an API key and the base64-encoded API secret
    pub fn new(api_key: impl Into<String>, api_secret: &str) -> Result<Self> {
        let secret = BASE64.decode(api_secret).map_err(|err| {
            KrakenError::Config(format!("failed to base64 decode api secret: {err}"))
        })?;
        Ok(Self {
            api_key: api_key.into(),
            signer: RequestSigner::new(secret),
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn sign(&self, path: &str, nonce: i64, post_data: &str) -> String {
        self.signer.sign(path, nonce, post_data)
    }
}

/// Main HTTP client for the Kraken REST API
#[derive(Debug)]
pub struct KrakenClient {
    http_client: Client,
    base_url: Url,
    credentials: Option<Credentials>,
    last_nonce: Mutex<i64>,
}

impl KrakenClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, API_BASE_URL)
    }

    /// Create a new client against an explicit base URL (used by tests)
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
            credentials: None,
            last_nonce: Mutex::new(0),
        })
    }

    /// Set credentials for private endpoints
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    /// Get credentials if set
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Build a request builder for public endpoints
    pub(crate) fn public_request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(endpoint)?;
        Ok(self.http_client.request(method, url))
    }

    /// Send a signed POST to a private endpoint.
    ///
    /// The body is url-encoded with keys in lexicographic order, a fresh
    /// nonce is added, and the API-Key/API-Sign headers are attached.
    pub(crate) async fn private_post<T: DeserializeOwned>(
        &self,
        path: &str,
        mut params: BTreeMap<String, String>,
    ) -> Result<T> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            KrakenError::Config("API credentials are required for private endpoints".to_string())
        })?;

        let nonce = self.next_nonce();
        params.insert("nonce".to_string(), nonce.to_string());
        let body = build_query_string(&params);
        let signature = credentials.sign(path, nonce, &body);

        let url = self.base_url.join(path)?;
        let builder = self
            .http_client
            .post(url)
            .header("API-Key", credentials.api_key())
            .header("API-Sign", signature)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body);

        self.send_json(builder).await
    }

    /// Send a request and decode the JSON response body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(KrakenError::api_error(status, body));
        }

        serde_json::from_str(&body).map_err(|err| {
            KrakenError::InvalidResponse(format!("failed to decode http body: {err}: {body}"))
        })
    }

    /// Produce a strictly increasing millisecond nonce
    fn next_nonce(&self) -> i64 {
        let mut last = self
            .last_nonce
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut nonce = chrono::Utc::now().timestamp_millis();
        if nonce <= *last {
            nonce = *last + 1;
        }
        *last = nonce;
        nonce
    }
}

/// Render params as `k1=v1&k2=v2` with keys already sorted by the BTreeMap
fn build_query_string(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}
