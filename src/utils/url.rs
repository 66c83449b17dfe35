//! URL utilities for episode pages, embed players and HLS manifests

use crate::error::GoloadError;
use url::Url;

/// File extension of HLS playlists
pub const MANIFEST_EXTENSION: &str = ".m3u8";

/// Path of the encrypted AJAX endpoint on the embed host
pub const AJAX_PATH: &str = "/encrypt-ajax.php";

/// Build the episode page URL from a site root and an episode id.
/// Full URLs are returned unchanged.
pub fn episode_url(base_url: &str, episode: &str) -> String {
    if episode.starts_with("http://") || episode.starts_with("https://") {
        return episode.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        episode.trim_start_matches('/')
    )
}

/// Read a query parameter from a URL, if present.
/// The value is returned as it appears in the URL, without percent-decoding.
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.query()?.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (key == name).then(|| value.to_string())
    })
}

/// `scheme://host[:port]` of a URL
pub fn origin(url: &str) -> Result<String, GoloadError> {
    let parsed = Url::parse(url)?;
    if parsed.host_str().is_none() {
        return Err(GoloadError::InvalidUrl(format!("no host in {}", url)));
    }
    Ok(parsed.origin().ascii_serialization())
}

/// AJAX endpoint on the same host as the embed player
pub fn ajax_endpoint(video_url: &str) -> Result<String, GoloadError> {
    Ok(format!("{}{}", origin(video_url)?, AJAX_PATH))
}

/// Everything before the last path segment of a manifest URL
pub fn manifest_base(manifest_url: &str) -> &str {
    let path = manifest_url.split(['?', '#']).next().unwrap_or(manifest_url);
    match path.rfind('/') {
        Some(index) => &path[..index],
        None => path,
    }
}

/// Resolve a rendition URI against the manifest directory
pub fn join_manifest_path(manifest_url: &str, relative: &str) -> String {
    if relative.starts_with("http://") || relative.starts_with("https://") {
        return relative.to_string();
    }
    format!("{}/{}", manifest_base(manifest_url), relative)
}

/// Check if a URL points at an HLS playlist (query string ignored)
pub fn is_manifest_url(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.ends_with(MANIFEST_EXTENSION)
}

/// Check if a URL mentions the HLS extension anywhere
pub fn mentions_manifest(url: &str) -> bool {
    url.contains(MANIFEST_EXTENSION)
}

/// Give protocol-relative embed links an explicit scheme
pub fn absolutize(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        url.to_string()
    }
}
