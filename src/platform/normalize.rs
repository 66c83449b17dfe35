//! Merge manifest renditions, direct sources and backups into one list

use crate::core::video_source::{VideoSource, QUALITY_BACKUP, QUALITY_DEFAULT};
use crate::platform::payload::{DecryptedPayload, SourceEntry};
use crate::utils::url::mentions_manifest;

/// Quality tag derived from a source label such as `"480 P"` or `"720p HD"`.
/// Only the leading token is used; a trailing `p` is kept as supplied.
pub fn label_quality(label: Option<&str>) -> String {
    let token = label
        .and_then(|l| l.split_whitespace().next())
        .unwrap_or("");
    if token.is_empty() {
        QUALITY_DEFAULT.to_string()
    } else if token.ends_with('p') || token.ends_with('P') {
        token.to_string()
    } else {
        format!("{}p", token)
    }
}

fn tagged(entry: &SourceEntry, quality: String) -> VideoSource {
    VideoSource::new(entry.file.clone(), mentions_manifest(&entry.file), quality)
}

/// Build the ordered result list:
/// renditions, then primary sources, then backups.
///
/// `renditions` is `Some` when manifest expansion ran, even if it found
/// nothing; primary sources are then tagged `default` instead of by label.
pub fn normalize_sources(
    renditions: Option<Vec<VideoSource>>,
    payload: &DecryptedPayload,
) -> Vec<VideoSource> {
    let expanded = renditions.is_some();
    let mut sources = renditions.unwrap_or_default();

    sources.extend(payload.source.iter().map(|entry| {
        let quality = if expanded {
            QUALITY_DEFAULT.to_string()
        } else {
            label_quality(entry.label.as_deref())
        };
        tagged(entry, quality)
    }));

    sources.extend(
        payload
            .source_bk
            .iter()
            .map(|entry| tagged(entry, QUALITY_BACKUP.to_string())),
    );

    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(file: &str, label: Option<&str>) -> SourceEntry {
        SourceEntry {
            file: file.to_string(),
            label: label.map(str::to_string),
        }
    }

    #[test]
    fn test_label_quality() {
        assert_eq!(label_quality(Some("480p Label")), "480p");
        assert_eq!(label_quality(Some("720 P")), "720p");
        assert_eq!(label_quality(Some("1080P")), "1080P");
        assert_eq!(label_quality(Some("hls P")), "hlsp");
        assert_eq!(label_quality(Some("  ")), "default");
        assert_eq!(label_quality(None), "default");
    }

    #[test]
    fn test_direct_source_then_backup() {
        let payload = DecryptedPayload {
            source: vec![entry("https://a/ep1.480.mp4", Some("480p Label"))],
            source_bk: vec![entry("https://b/ep1.mp4", Some("480p Label"))],
        };
        assert_eq!(
            normalize_sources(None, &payload),
            vec![
                VideoSource::new("https://a/ep1.480.mp4", false, "480p"),
                VideoSource::new("https://b/ep1.mp4", false, "backup"),
            ]
        );
    }

    #[test]
    fn test_manifest_payload_order() {
        let payload = DecryptedPayload {
            source: vec![entry("https://cdn/x/master.m3u8", Some("hls P"))],
            source_bk: vec![
                entry("https://bk/x/master.m3u8", Some("hls P")),
                entry("https://bk/x/file.mp4", None),
            ],
        };
        let renditions = vec![
            VideoSource::new("https://cdn/x/360/index.m3u8", true, "q360p"),
            VideoSource::new("https://cdn/x/720/index.m3u8", true, "q720p"),
        ];

        let sources = normalize_sources(Some(renditions), &payload);
        let qualities: Vec<&str> = sources.iter().map(|s| s.quality.as_str()).collect();
        assert_eq!(qualities, vec!["q360p", "q720p", "default", "backup", "backup"]);
        assert!(sources[2].is_adaptive);
        assert!(sources[3].is_adaptive);
        assert!(!sources[4].is_adaptive);
    }

    #[test]
    fn test_empty_expansion_still_tags_default() {
        let payload = DecryptedPayload {
            source: vec![entry("https://cdn/x/master.m3u8", Some("360 P"))],
            source_bk: vec![],
        };
        let sources = normalize_sources(Some(Vec::new()), &payload);
        assert_eq!(
            sources,
            vec![VideoSource::new("https://cdn/x/master.m3u8", true, "default")]
        );
    }

    #[test]
    fn test_every_backup_is_tagged_backup() {
        let payload = DecryptedPayload {
            source: vec![entry("https://a/v.mp4", Some("1080 P"))],
            source_bk: vec![
                entry("https://b/1.mp4", Some("1080 P")),
                entry("https://b/2.m3u8", Some("q720p")),
                entry("https://b/3", None),
            ],
        };
        let sources = normalize_sources(None, &payload);
        assert_eq!(sources.len(), 4);
        assert!(sources[1..].iter().all(|s| s.quality == "backup"));
    }
}
