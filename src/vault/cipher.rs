// Passbank — Password Token Cipher
//
// Seals passwords into self-describing tokens with AES-256-GCM.
//
// Token layout (URL-safe base64 of the concatenation):
//   version (1) || issued_at (8, big-endian unix seconds) || nonce (12) || ciphertext + tag
//
// The version byte and timestamp travel as associated data, so any change to
// them fails authentication just like a change to the ciphertext.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use rand::RngCore;
use zeroize::Zeroizing;

use super::VaultError;

const TOKEN_VERSION: u8 = 0x80;
const HEADER_LEN: usize = 1 + 8;
const NONCE_SIZE: usize = 12;
const TAG_SIZE: usize = 16;

/// Authenticated encryption of password strings under one symmetric key.
pub struct SecretCipher {
    cipher: Aes256Gcm,
}

impl SecretCipher {
    pub fn new(key: &[u8]) -> Result<Self, VaultError> {
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|_| VaultError::InvalidKey(format!("expected 32 key bytes, got {}", key.len())))?;
        Ok(Self { cipher })
    }

    /// Encrypt a password. Two calls with the same input never produce the same token.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, VaultError> {
        let issued_at = u64::try_from(Utc::now().timestamp()).unwrap_or(0);

        let mut header = [0u8; HEADER_LEN];
        header[0] = TOKEN_VERSION;
        header[1..].copy_from_slice(&issued_at.to_be_bytes());

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::rng().fill_bytes(&mut nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(
                Nonce::from_slice(&nonce_bytes),
                Payload {
                    msg: plaintext.as_bytes(),
                    aad: &header,
                },
            )
            .map_err(|e| VaultError::Encryption(e.to_string()))?;

        let mut token = Vec::with_capacity(HEADER_LEN + NONCE_SIZE + ciphertext.len());
        token.extend_from_slice(&header);
        token.extend_from_slice(&nonce_bytes);
        token.extend_from_slice(&ciphertext);

        Ok(URL_SAFE_NO_PAD.encode(token))
    }

    /// Decrypt a token. Fails closed: any malformed, truncated, tampered or
    /// foreign-key token yields `InvalidToken`, never partial plaintext.
    pub fn decrypt(&self, token: &str) -> Result<Zeroizing<String>, VaultError> {
        let raw = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|_| VaultError::InvalidToken)?;

        if raw.len() < HEADER_LEN + NONCE_SIZE + TAG_SIZE || raw[0] != TOKEN_VERSION {
            return Err(VaultError::InvalidToken);
        }

        let (header, rest) = raw.split_at(HEADER_LEN);
        let (nonce_bytes, ciphertext) = rest.split_at(NONCE_SIZE);

        let plaintext = self
            .cipher
            .decrypt(
                Nonce::from_slice(nonce_bytes),
                Payload {
                    msg: ciphertext,
                    aad: header,
                },
            )
            .map(Zeroizing::new)
            .map_err(|_| VaultError::InvalidToken)?;

        String::from_utf8(plaintext.to_vec())
            .map(Zeroizing::new)
            .map_err(|_| VaultError::InvalidToken)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
