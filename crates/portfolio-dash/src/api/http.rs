use async_trait::async_trait;
use portfolio_types::{PortfolioError, PortfolioResult};
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{ApiRequest, Backend};
use crate::config::DashConfig;

/// [`Backend`] over HTTP. No retries; no timeout unless configured.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    timeout: Option<Duration>,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> PortfolioResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| PortfolioError::Network(format!("Failed to build HTTP client: {}", e)))?;

        // A trailing slash keeps any path prefix of the base when joining.
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url)
            .map_err(|e| PortfolioError::Config(format!("Invalid API URL {:?}: {}", base_url, e)))?;

        Ok(Self {
            client,
            base_url,
            timeout: None,
        })
    }

    pub fn from_config(config: &DashConfig) -> PortfolioResult<Self> {
        let backend = Self::new(config.api_url.as_str())?;
        Ok(match config.request_timeout() {
            Some(timeout) => backend.with_timeout(timeout),
            None => backend,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for `request`: its path under the base, its query encoded once.
    pub fn url_for(&self, request: &ApiRequest) -> PortfolioResult<Url> {
        let mut url = self
            .base_url
            .join(request.path.trim_start_matches('/'))
            .map_err(|e| PortfolioError::InvalidEndpoint(format!("{}: {}", request, e)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn get_json(&self, request: &ApiRequest) -> PortfolioResult<Value> {
        let url = self.url_for(request)?;
        debug!("HTTP GET: {}", url);

        let mut builder = self.client.get(url);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| PortfolioError::Network(format!("GET {} failed: {}", request, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortfolioError::Http {
                status: status.as_u16(),
                path: request.to_string(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| PortfolioError::Decode(format!("{}: {}", request, e)))
    }
}
