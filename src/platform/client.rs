//! HTTP client for episode pages, the embed player and manifests

use crate::error::GoloadError;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, warn};

/// Desktop browser user agent sent by default
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default site root for episode ids
pub const DEFAULT_BASE_URL: &str = "https://anitaku.so";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Proxy URL
    pub proxy_url: Option<String>,
    /// Site root used to expand bare episode ids
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy_url: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Thin wrapper over `reqwest::Client` with the headers the site expects
#[derive(Debug, Clone)]
pub struct VideoClient {
    client: Client,
    config: ClientConfig,
}

impl VideoClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self, GoloadError> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self, GoloadError> {
        let mut builder = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .gzip(true)
            .brotli(true);

        if let Some(proxy_url) = &config.proxy_url {
            match reqwest::Proxy::all(proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => warn!("Ignoring invalid proxy {}: {}", proxy_url, e),
            }
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Get the underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Get client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a GET request with common browser headers
    pub fn create_request(&self, url: &str, referer: Option<&str>) -> reqwest::RequestBuilder {
        let request = self
            .client
            .get(url)
            .header("Accept", "*/*")
            .header("Accept-Language", "en-US,en;q=0.9");

        match referer {
            Some(referer) => request.header("Referer", referer),
            None => request,
        }
    }

    /// Create the AJAX request; the endpoint rejects calls without
    /// `X-Requested-With`.
    pub fn create_ajax_request(&self, url: &str, referer: &str) -> reqwest::RequestBuilder {
        self.create_request(url, Some(referer))
            .header("X-Requested-With", "XMLHttpRequest")
    }

    /// Fetch a URL as text
    pub async fn get_text(&self, url: &str, referer: Option<&str>) -> Result<String, GoloadError> {
        debug!("GET {}", url);
        let response = check_status(self.create_request(url, referer).send().await?)?;
        Ok(response.text().await?)
    }

    /// Call the AJAX endpoint and decode its JSON body
    pub async fn get_ajax_json<T>(&self, url: &str, referer: &str) -> Result<T, GoloadError>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!("AJAX GET {}", url);
        let response = check_status(self.create_ajax_request(url, referer).send().await?)?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GoloadError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        warn!("HTTP request failed with status: {}", status);
        Err(GoloadError::HttpStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}
