//! GogoCDN embed player extraction pipeline

use crate::core::video_source::VideoSource;
use crate::error::GoloadError;
use crate::platform::client::VideoClient;
use crate::platform::crypto::CipherKeySet;
use crate::platform::handshake::build_ajax_params;
use crate::platform::manifest::expand_manifest;
use crate::platform::normalize::normalize_sources;
use crate::platform::payload::{decode_payload, AjaxResponse, DecryptedPayload};
use crate::utils::url::{ajax_endpoint, is_manifest_url, query_param};
use tracing::{debug, info, warn};

/// Extractor for one embed host
#[async_trait::async_trait]
pub trait VideoExtractor: Send + Sync {
    /// Server name of the video provider
    fn server_name(&self) -> &'static str;

    /// Resolve an embed player URL into playable sources
    async fn extract(&self, video_url: &str) -> Result<Vec<VideoSource>, GoloadError>;
}

/// Extractor for the `streaming.php` player served by GogoCDN hosts
#[derive(Debug, Clone)]
pub struct GogoCdn {
    client: VideoClient,
    keys: CipherKeySet,
}

impl GogoCdn {
    /// Create a new extractor
    pub fn new(client: VideoClient, keys: CipherKeySet) -> Self {
        Self { client, keys }
    }

    /// Key material in use
    pub fn keys(&self) -> &CipherKeySet {
        &self.keys
    }

    /// Fetch and decrypt the source payload for an embed URL
    pub async fn fetch_payload(&self, video_url: &str) -> Result<DecryptedPayload, GoloadError> {
        let html = self.client.get_text(video_url, None).await?;

        let id = query_param(video_url, "id").unwrap_or_else(|| {
            warn!("No id parameter in {}, continuing with an empty id", video_url);
            String::new()
        });

        let params = build_ajax_params(&self.keys, &html, &id)?;
        let ajax_url = format!("{}?{}", ajax_endpoint(video_url)?, params);

        let response: AjaxResponse = self.client.get_ajax_json(&ajax_url, video_url).await?;
        decode_payload(&self.keys, &response.data)
    }

    /// Download a master playlist and expand it into renditions
    pub async fn expand(&self, manifest_url: &str, referer: &str) -> Result<Vec<VideoSource>, GoloadError> {
        let text = self
            .client
            .get_text(manifest_url, Some(referer))
            .await
            .map_err(|e| GoloadError::ManifestFetch(format!("{}: {}", manifest_url, e)))?;

        let renditions = expand_manifest(manifest_url, &text);
        if renditions.is_empty() {
            debug!("No resolution lines in {}", manifest_url);
        }
        Ok(renditions)
    }
}

#[async_trait::async_trait]
impl VideoExtractor for GogoCdn {
    fn server_name(&self) -> &'static str {
        "goload"
    }

    async fn extract(&self, video_url: &str) -> Result<Vec<VideoSource>, GoloadError> {
        info!("Extracting sources from {}", video_url);
        let payload = self.fetch_payload(video_url).await?;

        let renditions = match payload.primary() {
            Some(primary) if is_manifest_url(&primary.file) => {
                Some(self.expand(&primary.file, video_url).await?)
            }
            _ => None,
        };

        let sources = normalize_sources(renditions, &payload);
        info!("Resolved {} sources", sources.len());
        Ok(sources)
    }
}
