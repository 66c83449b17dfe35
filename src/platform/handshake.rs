//! Page token lookup and AJAX query construction

use crate::error::GoloadError;
use crate::platform::crypto::CipherKeySet;
use scraper::{Html, Selector};
use tracing::debug;

/// Script element carrying the encrypted episode parameters
const EPISODE_TOKEN_SELECTOR: &str = "script[data-name='episode']";
const EPISODE_TOKEN_ATTRIBUTE: &str = "data-value";

/// Read the opaque episode token from the embed page. The value is
/// returned untouched; `None` when the element or attribute is absent.
pub fn extract_episode_token(html: &str) -> Result<Option<String>, GoloadError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(EPISODE_TOKEN_SELECTOR)
        .map_err(|e| GoloadError::Selector(e.to_string()))?;

    Ok(document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr(EPISODE_TOKEN_ATTRIBUTE))
        .map(str::to_string))
}

/// Compose `id=<encrypted>&alias=<id>&<token params>`.
/// The encrypted id goes in raw, without percent-encoding.
pub fn compose_query(id: &str, encrypted_id: &str, token_params: &str) -> String {
    format!("id={}&alias={}&{}", encrypted_id, id, token_params)
}

/// Build the full AJAX query for an embed page
pub fn build_ajax_params(
    keys: &CipherKeySet,
    html: &str,
    id: &str,
) -> Result<String, GoloadError> {
    let encrypted_id = keys.encrypt_id(id)?;

    let token = extract_episode_token(html)?
        .ok_or_else(|| GoloadError::Decode("episode token not found in page".to_string()))?;
    let token_params = keys.decrypt_token(&token)?;
    debug!("Decrypted episode token ({} bytes)", token_params.len());

    Ok(compose_query(id, &encrypted_id, &token_params))
}
