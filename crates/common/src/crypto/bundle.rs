//! The sealed bundle wire format
//!
//! ```text
//! [ key_len: 1 byte = N ][ ephemeral_pubkey: N bytes ][ nonce: 12 bytes ][ ciphertext || tag ]
//! ```
//!
//! `N` is always [`EPHEMERAL_PUBLIC_KEY_SIZE`] (an uncompressed P-256 point). The prefix
//! byte only bounds the embedded key, never the payload, so the ciphertext region runs
//! to the end of the buffer.

use super::content_key::{NONCE_SIZE, TAG_SIZE};
use super::keys::PUBLIC_KEY_SIZE;

/// Size of the ephemeral key length prefix in bytes
pub const EPHEMERAL_KEY_LEN_PREFIX: usize = 1;
/// Size of the embedded ephemeral public key in bytes
pub const EPHEMERAL_PUBLIC_KEY_SIZE: usize = PUBLIC_KEY_SIZE;
/// Offset of the nonce within a bundle
pub const NONCE_OFFSET: usize = EPHEMERAL_KEY_LEN_PREFIX + EPHEMERAL_PUBLIC_KEY_SIZE;
/// Offset of the ciphertext within a bundle
pub const CIPHERTEXT_OFFSET: usize = NONCE_OFFSET + NONCE_SIZE;
/// Smallest well-formed bundle: an empty plaintext still carries a full tag
pub const MIN_BUNDLE_SIZE: usize = CIPHERTEXT_OFFSET + TAG_SIZE;

/// Errors that can occur while parsing a bundle
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("bundle is empty")]
    Empty,
    #[error("unexpected ephemeral key length, expected {expected}, got {got}")]
    KeyLength { expected: usize, got: usize },
    #[error("bundle too short, expected at least {expected} bytes, got {got}")]
    Truncated { expected: usize, got: usize },
}

/// A borrowed, parsed view of a sealed bundle
///
/// Parsing only checks structure. Whether the embedded key is a valid curve point
/// and whether the tag verifies is decided by the envelope codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bundle<'a> {
    pub ephemeral_public: &'a [u8],
    pub nonce: &'a [u8; NONCE_SIZE],
    pub ciphertext: &'a [u8],
}

impl<'a> Bundle<'a> {
    /// Parse a bundle from raw bytes without copying
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The buffer is empty
    /// - The declared key length is not [`EPHEMERAL_PUBLIC_KEY_SIZE`]
    /// - The buffer cannot hold the key, the nonce and a full tag
    pub fn parse(data: &'a [u8]) -> Result<Self, BundleError> {
        let (&key_len, rest) = data.split_first().ok_or(BundleError::Empty)?;
        let key_len = usize::from(key_len);

        if key_len != EPHEMERAL_PUBLIC_KEY_SIZE {
            return Err(BundleError::KeyLength {
                expected: EPHEMERAL_PUBLIC_KEY_SIZE,
                got: key_len,
            });
        }

        if data.len() < MIN_BUNDLE_SIZE {
            return Err(BundleError::Truncated {
                expected: MIN_BUNDLE_SIZE,
                got: data.len(),
            });
        }

        let (ephemeral_public, rest) = rest.split_at(key_len);
        let (nonce, ciphertext) = rest.split_at(NONCE_SIZE);
        let nonce = nonce
            .try_into()
            .map_err(|_| BundleError::Truncated {
                expected: MIN_BUNDLE_SIZE,
                got: data.len(),
            })?;

        Ok(Self {
            ephemeral_public,
            nonce,
            ciphertext,
        })
    }

    /// Serialize the bundle into a single contiguous buffer
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            EPHEMERAL_KEY_LEN_PREFIX + self.ephemeral_public.len() + NONCE_SIZE + self.ciphertext.len(),
        );
        // The key is always a fixed-size curve point, well under 256 bytes
        out.push(self.ephemeral_public.len() as u8);
        out.extend_from_slice(self.ephemeral_public);
        out.extend_from_slice(self.nonce);
        out.extend_from_slice(self.ciphertext);
        out
    }
}
