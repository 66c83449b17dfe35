//! HLS master playlist parsing and rendition expansion
//!
//! Grammar handled here:
//!
//! ```text
//! #EXT-X-STREAM-INF:<attribute-list>
//! <uri>
//! ```
//!
//! Blank lines and other tags between the two lines are skipped.

use crate::core::video_source::VideoSource;
use crate::utils::url::{is_manifest_url, join_manifest_path};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

const STREAM_INF_TAG: &str = "#EXT-X-STREAM-INF:";

/// A `STREAM-INF` tag together with the URI line that follows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInf {
    pub attributes: HashMap<String, String>,
    pub uri: String,
}

/// A rendition that declares its resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRendition {
    /// Declared `WIDTHxHEIGHT`
    pub resolution_label: String,
    /// URI relative to the master playlist
    pub relative_path: String,
}

impl ManifestRendition {
    /// Height component of the resolution
    pub fn height(&self) -> Option<&str> {
        static RESOLUTION_RE: OnceLock<Regex> = OnceLock::new();
        let re = RESOLUTION_RE.get_or_init(|| {
            Regex::new(r"^\s*(\d+)\s*[xX]\s*(\d+)\s*$").expect("resolution pattern is valid")
        });
        re.captures(&self.resolution_label)
            .and_then(|caps| caps.get(2))
            .map(|m| m.as_str())
    }

    /// Quality tag, e.g. `q720p`
    pub fn quality(&self) -> Option<String> {
        self.height().map(|h| format!("q{}p", h))
    }
}

/// Parse an attribute list such as `BANDWIDTH=1,CODECS="a,b",RESOLUTION=640x360`
pub fn parse_attribute_list(input: &str) -> HashMap<String, String> {
    let mut attributes = HashMap::new();
    let mut rest = input.trim();

    while !rest.is_empty() {
        let Some(eq) = rest.find('=') else {
            break;
        };
        let key = rest[..eq].trim().to_string();
        rest = &rest[eq + 1..];

        let value;
        if let Some(quoted) = rest.strip_prefix('"') {
            let end = quoted.find('"').unwrap_or(quoted.len());
            value = quoted[..end].to_string();
            rest = quoted.get(end + 1..).unwrap_or("");
            rest = rest.trim_start_matches(|c: char| c != ',');
        } else {
            let end = rest.find(',').unwrap_or(rest.len());
            value = rest[..end].trim().to_string();
            rest = &rest[end..];
        }
        rest = rest.strip_prefix(',').unwrap_or(rest).trim_start();

        if !key.is_empty() {
            attributes.insert(key, value);
        }
    }

    attributes
}

/// Collect every `STREAM-INF` entry of a master playlist
pub fn parse_master_playlist(text: &str) -> Vec<StreamInf> {
    let mut entries = Vec::new();
    let mut pending: Option<HashMap<String, String>> = None;

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        if let Some(attrs) = line.strip_prefix(STREAM_INF_TAG) {
            pending = Some(parse_attribute_list(attrs));
        } else if line.starts_with('#') {
            continue;
        } else if let Some(attributes) = pending.take() {
            entries.push(StreamInf {
                attributes,
                uri: line.to_string(),
            });
        }
    }

    entries
}

/// Renditions that declare a `RESOLUTION`
pub fn parse_renditions(text: &str) -> Vec<ManifestRendition> {
    parse_master_playlist(text)
        .into_iter()
        .filter_map(|entry| {
            let resolution = entry.attributes.get("RESOLUTION")?;
            Some(ManifestRendition {
                resolution_label: resolution.clone(),
                relative_path: entry.uri,
            })
        })
        .collect()
}

/// Turn a master playlist into one source per rendition.
/// A playlist without resolution lines yields nothing.
pub fn expand_manifest(manifest_url: &str, text: &str) -> Vec<VideoSource> {
    parse_renditions(text)
        .into_iter()
        .filter_map(|rendition| {
            let quality = rendition.quality()?;
            let url = join_manifest_path(manifest_url, &rendition.relative_path);
            let is_adaptive = is_manifest_url(&url);
            Some(VideoSource::new(url, is_adaptive, quality))
        })
        .collect()
}
