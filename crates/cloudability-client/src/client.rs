//! HTTP plumbing shared by the API services

use crate::error::{ClientError, Result};
use crate::model::{ApiErrorBody, ApiResponse};
use crate::vendors::Vendors;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.cloudability.com/v3";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`Client`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Cloudability API client
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    api_key: String,
    base_url: reqwest::Url,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ClientError::InvalidConfig("API key is empty".to_string()));
        }

        let base_url = reqwest::Url::parse(config.base_url.trim_end_matches('/')).map_err(|e| {
            ClientError::InvalidConfig(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidConfig(format!(
                "base URL '{}' cannot take a path",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("cloudability-accounts/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                api_key: config.api_key,
                base_url,
            }),
        })
    }

    /// Vendor account endpoints
    pub fn vendors(&self) -> Vendors {
        Vendors::new(self.clone())
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    pub(crate) fn get(&self, segments: &[&str]) -> Result<reqwest::RequestBuilder> {
        self.request(reqwest::Method::GET, segments)
    }

    pub(crate) fn post(&self, segments: &[&str]) -> Result<reqwest::RequestBuilder> {
        self.request(reqwest::Method::POST, segments)
    }

    pub(crate) fn delete(&self, segments: &[&str]) -> Result<reqwest::RequestBuilder> {
        self.request(reqwest::Method::DELETE, segments)
    }

    fn request(&self, method: reqwest::Method, segments: &[&str]) -> Result<reqwest::RequestBuilder> {
        let url = self.url(segments)?;
        tracing::debug!("{} {}", method, url);
        Ok(self
            .inner
            .http
            .request(method, url)
            .basic_auth(&self.inner.api_key, Some("")))
    }

    /// Append `segments` to the base URL, each percent-encoded as one segment
    ///
    /// `/`, `?` and `#` inside a value never change which resource is addressed.
    fn url(&self, segments: &[&str]) -> Result<reqwest::Url> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(ClientError::InvalidSegment(bad.to_string()));
        }

        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidConfig(format!("{} cannot take a path", self.base_url())))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and unwrap the `{"result": ...}` envelope
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let body = check_status(response).await?;
        let envelope: ApiResponse<T> = serde_json::from_slice(&body)?;
        Ok(envelope.result)
    }

    /// Send a request whose response body is irrelevant
    pub(crate) async fn send_empty(&self, request: reqwest::RequestBuilder) -> Result<()> {
        let response = request.send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into [`ClientError::Api`], returning the body otherwise
async fn check_status(response: reqwest::Response) -> Result<Vec<u8>> {
    let status = response.status();
    let body = response.bytes().await?;

    if status.is_success() {
        return Ok(body.to_vec());
    }

    tracing::debug!("API returned {}: {}", status, String::from_utf8_lossy(&body));

    let err = match serde_json::from_slice::<ApiErrorBody>(&body) {
        Ok(parsed) => ClientError::Api {
            status: status.as_u16(),
            code: parsed.error.code,
            messages: parsed.error.messages,
        },
        Err(_) => {
            let text = String::from_utf8_lossy(&body).trim().to_string();
            let message = if text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                text
            };
            ClientError::Api {
                status: status.as_u16(),
                code: None,
                messages: vec![message],
            }
        }
    };
    Err(err)
}
