//! Encrypted AJAX payload decoding

use crate::error::GoloadError;
use crate::platform::crypto::CipherKeySet;
use serde::{Deserialize, Deserializer};
use tracing::debug;

/// Body of the `encrypt-ajax.php` response
#[derive(Debug, Clone, Deserialize)]
pub struct AjaxResponse {
    /// Base64 ciphertext of the source payload
    pub data: String,
}

/// One entry of the `source` or `source_bk` list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceEntry {
    pub file: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Decrypted source description
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DecryptedPayload {
    /// Primary sources
    #[serde(default, deserialize_with = "nullable_list")]
    pub source: Vec<SourceEntry>,
    /// Backup sources
    #[serde(default, deserialize_with = "nullable_list")]
    pub source_bk: Vec<SourceEntry>,
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<SourceEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<SourceEntry>>::deserialize(deserializer)?.unwrap_or_default())
}

impl DecryptedPayload {
    /// First primary source
    pub fn primary(&self) -> Option<&SourceEntry> {
        self.source.first()
    }
}

/// Parse decrypted payload text. A payload without primary sources
/// means this server has nothing to play.
pub fn parse_payload(text: &str) -> Result<DecryptedPayload, GoloadError> {
    let payload: DecryptedPayload = serde_json::from_str(text)?;
    if payload.source.is_empty() {
        return Err(GoloadError::NoPlayableSource);
    }
    Ok(payload)
}

/// Decrypt the `data` field with the payload key and parse it
pub fn decode_payload(keys: &CipherKeySet, data: &str) -> Result<DecryptedPayload, GoloadError> {
    let text = keys.decrypt_payload(data)?;
    let payload = parse_payload(&text)?;
    debug!(
        "Decoded payload: {} sources, {} backup sources",
        payload.source.len(),
        payload.source_bk.len()
    );
    Ok(payload)
}
