//! # HTTP Connection
//!
//! Provides the [`Transport`] seam between the client and the patient API, and
//! the production implementation over HTTP.
//!
//! ## Wire Protocol
//!
//! Every request carries `Content-Type: application/json`. Every response body
//! is decoded as an [`ApiResult`] whatever the HTTP status, because the API
//! answers rejected input (400), missing patients (404) and server faults (500)
//! with a `{"success": false, "error": ...}` envelope:
//! ```text
//! PUT /api/paciente/3/atualizar   {"weight": "72"}
//! 400                             {"success": false, "error": "Peso deve estar entre 6kg e 635kg"}
//! ```
//!
//! A body that is not JSON is a [`ClientError::Decode`].

use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use std::future::Future;

use super::config::ApiConfig;
use super::error::{ClientError, ClientResult};
use super::messages::{ApiRequest, ApiResult, Method};

/// Sends one request and yields the decoded response envelope.
///
/// Implementations perform exactly one round trip per call and never retry.
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> impl Future<Output = ClientResult<ApiResult>> + Send;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the API described by `config`.
    ///
    /// # Returns
    /// - `Ok(HttpTransport)`: base URL is valid and the client was built
    /// - `Err(ClientError::InvalidUrl)`: `base_url` does not parse
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{} ({})", config.base_url, e)))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve an API path against the base URL, keeping any path prefix the base carries.
    fn url_for(&self, path: &str) -> ClientResult<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{} ({})", raw, e)))
    }

    async fn round_trip(&self, request: ApiRequest) -> ClientResult<ApiResult> {
        let url = self.url_for(&request.path)?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(
            "{} {} -> {} ({} bytes)",
            request.method,
            request.path,
            status,
            bytes.len()
        );

        let result: ApiResult = serde_json::from_slice(&bytes)?;
        Ok(result)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = ClientResult<ApiResult>> + Send {
        self.round_trip(request)
    }
}
