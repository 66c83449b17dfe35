//! Resolved stream structures

use serde::{Deserialize, Serialize};

/// Quality tag for entries taken verbatim from a manifest-backed payload
pub const QUALITY_DEFAULT: &str = "default";

/// Quality tag for entries from the backup source list
pub const QUALITY_BACKUP: &str = "backup";

/// One playable stream URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSource {
    /// Playable URL
    pub url: String,
    /// Whether the URL is an HLS playlist
    pub is_adaptive: bool,
    /// `q<N>p`, `<N>p`, `default` or `backup`
    pub quality: String,
}

impl VideoSource {
    /// Create a new VideoSource
    pub fn new(url: impl Into<String>, is_adaptive: bool, quality: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            is_adaptive,
            quality: quality.into(),
        }
    }

    /// Vertical resolution encoded in the quality tag, if any
    pub fn height(&self) -> Option<u32> {
        let tag = self.quality.strip_prefix('q').unwrap_or(&self.quality);
        let digits = tag.strip_suffix('p').or_else(|| tag.strip_suffix('P'))?;
        digits.parse().ok()
    }

    /// Check if this is a backup stream
    pub fn is_backup(&self) -> bool {
        self.quality == QUALITY_BACKUP
    }
}

/// Sort sources best first. Entries without a height keep their
/// relative order after the ranked ones.
pub fn sort_by_quality(sources: &mut [VideoSource]) {
    sources.sort_by(|a, b| match (a.height(), b.height()) {
        (Some(a_h), Some(b_h)) => b_h.cmp(&a_h),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Server entry listed on an episode page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeServer {
    /// Server id, the class of the list item (`anime`, `vidcdn`, ...)
    pub id: String,
    /// Human readable name shown on the site
    pub display_name: String,
}

/// Input to the server dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSelection {
    /// Episode page URL
    pub page_url: String,
    /// Caller-selected server id
    pub source_id: String,
}

impl ServerSelection {
    /// Create a new selection
    pub fn new(page_url: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
            source_id: source_id.into(),
        }
    }

    /// DOM path this selection resolves through
    pub fn kind(&self) -> ServerKind {
        ServerKind::from_source_id(&self.source_id)
    }
}

/// Where the embed player URL lives on the episode page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerKind {
    /// `src` of the main player iframe (`anime` server)
    IframeSource,
    /// `data-video` of the backup CDN anchor (every other id)
    AnchorDataVideo,
}

impl ServerKind {
    /// Server id of the main player
    pub const ANIME_ID: &'static str = "anime";
    /// Server id of the backup CDN
    pub const VIDCDN_ID: &'static str = "vidcdn";

    /// Map a caller-supplied server id to a DOM path
    pub fn from_source_id(source_id: &str) -> Self {
        match source_id {
            Self::ANIME_ID => ServerKind::IframeSource,
            _ => ServerKind::AnchorDataVideo,
        }
    }

    /// Server ids the dispatcher can decode
    pub fn supported_ids() -> [&'static str; 2] {
        [Self::ANIME_ID, Self::VIDCDN_ID]
    }

    /// CSS selector of the node carrying the embed URL
    pub fn selector(&self) -> &'static str {
        match self {
            ServerKind::IframeSource => "#load_anime > div > div > iframe",
            ServerKind::AnchorDataVideo => {
                "div.anime_video_body > div.anime_muti_link > ul > li.vidcdn > a"
            }
        }
    }

    /// Attribute holding the embed URL
    pub fn attribute(&self) -> &'static str {
        match self {
            ServerKind::IframeSource => "src",
            ServerKind::AnchorDataVideo => "data-video",
        }
    }
}
