//! AES-256-CBC codec for the GogoCDN handshake
//!
//! Ciphertext travels as standard Base64 in query strings and JSON fields.
//! Both layers share one IV; the remote side expects exactly that.

use crate::error::GoloadError;
use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use std::fmt;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Fixed key material used by the embed player
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CipherKeySet {
    /// Key for the id/token layer
    pub key: [u8; 32],
    /// Key for the source payload layer
    pub second_key: [u8; 32],
    /// IV shared by both layers
    pub iv: [u8; 16],
}

impl CipherKeySet {
    /// Keys shipped by the GogoCDN player
    pub const GOGOCDN: CipherKeySet = CipherKeySet {
        key: *b"37911490979715163134003223491201",
        second_key: *b"54674138327930866480207815084989",
        iv: *b"3134003223491201",
    };

    /// Encrypt the episode id for the `id=` query parameter
    pub fn encrypt_id(&self, id: &str) -> Result<String, GoloadError> {
        encrypt(id, &self.key, &self.iv)
    }

    /// Decrypt the token embedded in the episode page
    pub fn decrypt_token(&self, token: &str) -> Result<String, GoloadError> {
        decrypt(token, &self.key, &self.iv)
    }

    /// Decrypt the `data` field of the AJAX response
    pub fn decrypt_payload(&self, data: &str) -> Result<String, GoloadError> {
        decrypt(data, &self.second_key, &self.iv)
    }
}

impl Default for CipherKeySet {
    fn default() -> Self {
        Self::GOGOCDN
    }
}

impl fmt::Debug for CipherKeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherKeySet").finish_non_exhaustive()
    }
}

/// Encrypt a UTF-8 string and return Base64 ciphertext
pub fn encrypt(plaintext: &str, key: &[u8], iv: &[u8]) -> Result<String, GoloadError> {
    let cipher = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| GoloadError::Decode(format!("cipher init failed: {e}")))?;
    let bytes = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
    Ok(STANDARD.encode(bytes))
}

/// Decrypt Base64 ciphertext back into a UTF-8 string
pub fn decrypt(cipher_text: &str, key: &[u8], iv: &[u8]) -> Result<String, GoloadError> {
    let bytes = STANDARD
        .decode(cipher_text.trim())
        .map_err(|e| GoloadError::Decode(format!("invalid base64: {e}")))?;

    let cipher = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|e| GoloadError::Decode(format!("cipher init failed: {e}")))?;
    let plain = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&bytes)
        .map_err(|_| GoloadError::Decode("invalid padding".to_string()))?;

    String::from_utf8(plain)
        .map_err(|e| GoloadError::Decode(format!("plaintext is not UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: CipherKeySet = CipherKeySet::GOGOCDN;

    #[test]
    fn test_round_trip_both_layers() {
        let samples = [
            "",
            "12345",
            "MTg0NzYz",
            "ep=1&id=999&title=Spy%20x%20Family",
            "ünïcödé / 日本語",
        ];
        for s in samples {
            let id_layer = encrypt(s, &KEYS.key, &KEYS.iv).unwrap();
            assert_eq!(decrypt(&id_layer, &KEYS.key, &KEYS.iv).unwrap(), s);

            let payload_layer = encrypt(s, &KEYS.second_key, &KEYS.iv).unwrap();
            assert_eq!(decrypt(&payload_layer, &KEYS.second_key, &KEYS.iv).unwrap(), s);
        }
    }

    #[test]
    fn test_ciphertext_is_block_aligned_base64() {
        let ct = KEYS.encrypt_id("12345").unwrap();
        let raw = STANDARD.decode(&ct).unwrap();
        assert_eq!(raw.len(), 16);

        // A full block of padding is appended when the input is aligned
        let ct = KEYS.encrypt_id("0123456789abcdef").unwrap();
        assert_eq!(STANDARD.decode(&ct).unwrap().len(), 32);
    }

    #[test]
    fn test_encryption_is_deterministic() {
        assert_eq!(
            KEYS.encrypt_id("12345").unwrap(),
            KEYS.encrypt_id("12345").unwrap()
        );
    }

    #[test]
    fn test_layers_use_different_keys() {
        let ct = KEYS.encrypt_id("hello").unwrap();
        assert_ne!(ct, encrypt("hello", &KEYS.second_key, &KEYS.iv).unwrap());
    }

    #[test]
    fn test_wrong_key_fails_or_differs() {
        let ct = encrypt("{\"source\":[]}", &KEYS.second_key, &KEYS.iv).unwrap();
        match KEYS.decrypt_token(&ct) {
            Ok(text) => assert_ne!(text, "{\"source\":[]}"),
            Err(err) => assert!(err.is_decode_error()),
        }
    }

    #[test]
    fn test_corrupted_base64() {
        let err = KEYS.decrypt_payload("not*base64!").unwrap_err();
        assert!(matches!(err, GoloadError::Decode(_)));
    }

    #[test]
    fn test_truncated_ciphertext() {
        // 15 bytes cannot be a CBC ciphertext
        let short = STANDARD.encode([7u8; 15]);
        assert!(KEYS.decrypt_payload(&short).unwrap_err().is_decode_error());
    }

    #[test]
    fn test_bad_key_length() {
        let err = encrypt("x", b"short", &KEYS.iv).unwrap_err();
        assert!(err.is_decode_error());
    }

    #[test]
    fn test_debug_hides_keys() {
        let text = format!("{:?}", KEYS);
        assert!(!text.contains("3791"));
    }
}
