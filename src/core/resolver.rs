//! Server dispatcher and resolution façade

use crate::core::video_source::{EpisodeServer, ServerSelection, VideoSource};
use crate::error::GoloadError;
use crate::platform::{find_embed_url, list_servers, CipherKeySet, ClientConfig, GogoCdn, VideoClient, VideoExtractor};
use crate::utils::episode_url;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Resolves episode pages into playable sources
#[derive(Debug, Clone)]
pub struct Resolver {
    config: ClientConfig,
    keys: CipherKeySet,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    /// Create a new resolver with default configuration
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            keys: CipherKeySet::GOGOCDN,
        }
    }

    /// Replace the whole HTTP configuration
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Use different key material
    pub fn with_keys(mut self, keys: CipherKeySet) -> Self {
        self.keys = keys;
        self
    }

    /// Set the site root used for bare episode ids
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set proxy URL
    pub fn with_proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.config.proxy_url = Some(proxy_url.into());
        self
    }

    /// Current HTTP configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Page URL for an episode id or URL
    pub fn page_url(&self, episode: &str) -> String {
        episode_url(&self.config.base_url, episode)
    }

    fn client(&self) -> Result<VideoClient, GoloadError> {
        VideoClient::with_config(self.config.clone())
    }

    /// Find the embed player for a server on the episode page and
    /// run it through the extraction pipeline
    pub async fn resolve_selection(
        &self,
        selection: &ServerSelection,
    ) -> Result<Vec<VideoSource>, GoloadError> {
        let client = self.client()?;
        let kind = selection.kind();
        info!(
            "Resolving {} via server '{}' ({:?})",
            selection.page_url, selection.source_id, kind
        );

        let html = client.get_text(&selection.page_url, None).await?;
        let embed_url = find_embed_url(&html, kind)?;

        let extractor = GogoCdn::new(client, self.keys);
        debug!("Using {} extractor for {}", extractor.server_name(), embed_url);
        extractor.extract(&embed_url).await
    }

    /// Resolve an episode (page URL or id) through one server
    pub async fn resolve(&self, episode: &str, source_id: &str) -> Result<Vec<VideoSource>, GoloadError> {
        let selection = ServerSelection::new(self.page_url(episode), source_id);
        self.resolve_selection(&selection).await
    }

    /// Run an embed player URL straight through the extraction pipeline
    pub async fn extract(&self, video_url: &str) -> Result<Vec<VideoSource>, GoloadError> {
        GogoCdn::new(self.client()?, self.keys).extract(video_url).await
    }

    /// Servers listed on an episode page
    pub async fn servers(&self, episode: &str) -> Result<Vec<EpisodeServer>, GoloadError> {
        let html = self.client()?.get_text(&self.page_url(episode), None).await?;
        list_servers(&html)
    }

    /// Try server ids in order, moving on only when a server has nothing
    /// to offer. Other errors end the attempt.
    pub async fn resolve_first_available(
        &self,
        episode: &str,
        source_ids: &[&str],
    ) -> Result<(String, Vec<VideoSource>), GoloadError> {
        let mut last_error = GoloadError::NoPlayableSource;

        for source_id in source_ids {
            match self.resolve(episode, source_id).await {
                Ok(sources) => return Ok((source_id.to_string(), sources)),
                Err(e) if e.should_try_another_server() => {
                    warn!("Server '{}' failed: {}, trying next", source_id, e);
                    last_error = e;
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error)
    }

    /// Resolve several servers concurrently, one result per id
    pub async fn resolve_all(
        &self,
        episode: &str,
        source_ids: &[&str],
    ) -> Vec<(String, Result<Vec<VideoSource>, GoloadError>)> {
        let futures = source_ids.iter().map(|source_id| async move {
            (source_id.to_string(), self.resolve(episode, source_id).await)
        });
        futures::future::join_all(futures).await
    }
}
