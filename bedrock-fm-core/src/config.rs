//! Runtime configuration.
//!
//! ```rust,ignore
//! use bedrock_fm_core::BedrockConfig;
//!
//! let config = BedrockConfig::builder()
//!     .region("eu-west-1")
//!     .api_key(std::env::var("AWS_BEARER_TOKEN_BEDROCK")?)
//!     .timeout(std::time::Duration::from_secs(30))
//!     .build()?;
//! ```

use crate::defaults;
use crate::error::{FmError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use std::collections::BTreeMap;
use std::time::Duration;

/// Connection settings for the Bedrock runtime.
#[derive(Debug, Clone)]
pub struct BedrockConfig {
    pub region: String,
    /// Overrides the regional runtime URL (VPC endpoints, local mocks).
    pub endpoint: Option<String>,
    /// Bedrock API key, sent as a bearer token.
    pub api_key: Option<SecretString>,
    /// Extra headers added to every request, e.g. pre-signed SigV4 headers.
    pub extra_headers: BTreeMap<String, String>,
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            region: defaults::endpoint::REGION.to_string(),
            endpoint: None,
            api_key: None,
            extra_headers: BTreeMap::new(),
            timeout: Some(defaults::http::REQUEST_TIMEOUT),
            connect_timeout: Some(defaults::http::CONNECT_TIMEOUT),
            user_agent: defaults::http::USER_AGENT.to_string(),
        }
    }
}

impl BedrockConfig {
    pub fn builder() -> BedrockConfigBuilder {
        BedrockConfigBuilder::new()
    }

    /// Configuration from `AWS_REGION` / `AWS_DEFAULT_REGION`, `AWS_BEARER_TOKEN_BEDROCK`
    /// and `BEDROCK_ENDPOINT_URL`.
    pub fn from_env() -> Self {
        BedrockConfigBuilder::from_env().into_config()
    }

    pub fn base_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => defaults::endpoint::runtime_url(&self.region),
        }
    }

    /// Headers shared by every request (auth and caller-supplied extras).
    pub fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        if let Some(api_key) = self
            .api_key
            .as_ref()
            .map(|k| k.expose_secret())
            .filter(|k| !k.trim().is_empty())
        {
            let mut value = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                FmError::ConfigurationError(format!("Invalid Bedrock bearer token: {e}"))
            })?;
            value.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        for (k, v) in &self.extra_headers {
            let name = HeaderName::from_bytes(k.as_bytes())
                .map_err(|e| FmError::ConfigurationError(format!("Invalid header name {k}: {e}")))?;
            let value = HeaderValue::from_str(v).map_err(|e| {
                FmError::ConfigurationError(format!("Invalid header value for {k}: {e}"))
            })?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// A reqwest client honouring the configured timeouts and user agent.
    pub fn build_http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent.clone());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        builder
            .build()
            .map_err(|e| FmError::ConfigurationError(format!("Failed to build HTTP client: {e}")))
    }
}

/// Builder for [`BedrockConfig`].
#[derive(Debug, Clone, Default)]
pub struct BedrockConfigBuilder {
    config: BedrockConfig,
}

impl BedrockConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the environment; explicit setters still override.
    pub fn from_env() -> Self {
        let mut builder = Self::new();
        let region = std::env::var(defaults::endpoint::REGION_ENV)
            .or_else(|_| std::env::var(defaults::endpoint::DEFAULT_REGION_ENV))
            .ok()
            .filter(|r| !r.trim().is_empty());
        if let Some(region) = region {
            builder = builder.region(region);
        }
        if let Ok(token) = std::env::var(defaults::endpoint::BEARER_TOKEN_ENV) {
            builder = builder.api_key(token);
        }
        if let Ok(endpoint) = std::env::var(defaults::endpoint::ENDPOINT_URL_ENV) {
            builder = builder.endpoint(endpoint);
        }
        builder
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.config.region = region.into();
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = Some(endpoint.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.extra_headers.insert(name.into(), value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Disable the request timeout (long streams).
    pub fn no_timeout(mut self) -> Self {
        self.config.timeout = None;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    fn into_config(self) -> BedrockConfig {
        self.config
    }

    pub fn build(self) -> Result<BedrockConfig> {
        if self.config.region.trim().is_empty() && self.config.endpoint.is_none() {
            return Err(FmError::ConfigurationError(
                "either a region or an endpoint must be set".to_string(),
            ));
        }
        if let Some(endpoint) = &self.config.endpoint
            && !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(FmError::ConfigurationError(format!(
                "endpoint must be an http(s) URL, got {endpoint}"
            )));
        }
        self.config.default_headers()?;
        Ok(self.config)
    }
}
