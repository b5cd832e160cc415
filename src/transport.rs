//! HTTP transport boundary
//!
//! [`Transport`] is the one collaborator the roles client talks to: four
//! verb-shaped methods, each a single request/response exchange. The default
//! implementation, [`HttpTransport`], wraps a `reqwest::Client` built from
//! [`Config`]. Retry, cancellation, and timeout policy live here (or in
//! whatever replaces this layer), never in the roles client above it.

use crate::config::Config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Request/response collaborator for the roles client
///
/// Every method fails with a status-mapped [`Error`] on a non-2xx response
/// and with [`Error::Http`] when no response was received at all.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `path`, returning the decoded JSON body
    async fn get(&self, path: &str) -> Result<Value>;

    /// DELETE `path`; the response body, if any, is discarded
    async fn delete(&self, path: &str) -> Result<()>;

    /// PUT `path` with a JSON body and query parameters; no response body
    async fn put(&self, path: &str, body: Value, query: &[(&str, String)]) -> Result<()>;

    /// POST `path` with a JSON body, returning the decoded JSON body
    async fn post(&self, path: &str, body: Value) -> Result<Value>;
}

/// Default [`Transport`] over reqwest
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    api_key: Option<String>,
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from the given configuration
    pub fn new(config: Config) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(Error::Config("base_url must not be empty".into()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            base_url: config.base_url,
            api_key: config.api_key,
            http_client,
        })
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http_client.request(method, url);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }
        builder
    }
}

/// Map a non-2xx response to an error carrying its status and body text
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::from_status(status, body))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        let body = check_status(response).await?.json().await?;
        Ok(body)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let response = self.request(reqwest::Method::DELETE, path).send().await?;
        check_status(response).await?;
        Ok(())
    }

    async fn put(&self, path: &str, body: Value, query: &[(&str, String)]) -> Result<()> {
        let response = self
            .request(reqwest::Method::PUT, path)
            .query(query)
            .json(&body)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(&body)
            .send()
            .await?;
        let body = check_status(response).await?.json().await?;
        Ok(body)
    }
}
