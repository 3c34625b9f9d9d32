//! Cryptographic Utilities

use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng as AeadOsRng},
};
use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;

/// AES-256 key length in bytes
pub const FIELD_KEY_LENGTH: usize = 32;

/// AES-GCM nonce length in bytes
const NONCE_LENGTH: usize = 12;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

// ============================================================================
// Field Cipher (AES-256-GCM)
// ============================================================================

/// Field encryption errors
#[derive(Debug, Error)]
pub enum CipherError {
    /// Key is not valid base64 or has the wrong length
    #[error("Invalid field encryption key: expected {FIELD_KEY_LENGTH} bytes")]
    InvalidKey,

    /// Sealed value is not valid base64 or is truncated
    #[error("Sealed value is malformed")]
    Malformed,

    /// Encryption failed
    #[error("Encryption failed")]
    SealFailed,

    /// Authentication tag mismatch (wrong key or tampered value)
    #[error("Decryption failed")]
    OpenFailed,
}

/// Seals individual text fields with AES-256-GCM
///
/// Output format: `base64(nonce || ciphertext || tag)`. A fresh random nonce is
/// drawn for every call, so sealing the same value twice yields different
/// output.
#[derive(Clone)]
pub struct FieldCipher {
    cipher: Aes256Gcm,
}

impl FieldCipher {
    /// Create from raw key bytes
    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        if key.len() != FIELD_KEY_LENGTH {
            return Err(CipherError::InvalidKey);
        }
        let key = Key::<Aes256Gcm>::from_slice(key);
        Ok(Self {
            cipher: Aes256Gcm::new(key),
        })
    }

    /// Create from a base64-encoded key (as stored in key files)
    pub fn from_base64_key(encoded: &str) -> Result<Self, CipherError> {
        let key = from_base64(encoded.trim()).map_err(|_| CipherError::InvalidKey)?;
        Self::new(&key)
    }

    /// Generate a random base64-encoded key
    pub fn generate_key() -> String {
        to_base64(&random_bytes(FIELD_KEY_LENGTH))
    }

    /// Encrypt a text value
    pub fn seal(&self, plaintext: &str) -> Result<String, CipherError> {
        let nonce = Aes256Gcm::generate_nonce(&mut AeadOsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CipherError::SealFailed)?;

        let mut sealed = nonce.to_vec();
        sealed.extend_from_slice(&ciphertext);
        Ok(to_base64(&sealed))
    }

    /// Decrypt a value produced by [`FieldCipher::seal`]
    pub fn open(&self, sealed: &str) -> Result<String, CipherError> {
        let bytes = from_base64(sealed).map_err(|_| CipherError::Malformed)?;
        if bytes.len() <= NONCE_LENGTH {
            return Err(CipherError::Malformed);
        }

        let (nonce, ciphertext) = bytes.split_at(NONCE_LENGTH);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CipherError::OpenFailed)?;

        String::from_utf8(plaintext).map_err(|_| CipherError::Malformed)
    }
}

impl std::fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCipher").field("key", &"[REDACTED]").finish()
    }
}
