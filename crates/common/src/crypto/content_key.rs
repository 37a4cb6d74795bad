//! Content encryption using AES-256-GCM
//!
//! A `ContentKey` is never generated directly: it is derived from an ECDH shared
//! secret between an ephemeral key and the recipient key, so every sealed bundle is
//! encrypted under a key that exists for the duration of one call.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use p256::ecdh::SharedSecret;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of AES-GCM nonce in bytes
pub const NONCE_SIZE: usize = 12;
/// Size of AES-GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;
/// Size of AES-256 key in bytes
pub const CONTENT_KEY_SIZE: usize = 32;

/// Errors that can occur during content encryption/decryption
///
/// Decryption failure is deliberately opaque: a wrong key and a tampered
/// ciphertext are indistinguishable.
#[derive(Debug, thiserror::Error)]
pub enum ContentKeyError {
    #[error("no cryptographic random source available: {0}")]
    CryptoUnavailable(getrandom::Error),
    #[error("encrypt error")]
    Encrypt,
    #[error("decrypt error")]
    Decrypt,
}

/// A 256-bit AES-GCM key, wiped from memory on drop
///
/// The key is the raw x-coordinate of the ECDH shared point, which is exactly
/// what WebCrypto's `ECDH deriveKey` hands to `AES-GCM` with `length: 256`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ContentKey([u8; CONTENT_KEY_SIZE]);

impl From<&SharedSecret> for ContentKey {
    fn from(shared: &SharedSecret) -> Self {
        let mut key = [0u8; CONTENT_KEY_SIZE];
        key.copy_from_slice(shared.raw_secret_bytes().as_slice());
        Self(key)
    }
}

impl ContentKey {
    /// Generate a fresh random nonce from the OS CSPRNG
    pub fn generate_nonce() -> Result<[u8; NONCE_SIZE], ContentKeyError> {
        let mut nonce = [0u8; NONCE_SIZE];
        getrandom::getrandom(&mut nonce).map_err(ContentKeyError::CryptoUnavailable)?;
        Ok(nonce)
    }

    /// Encrypt data with AES-256-GCM and no associated data
    ///
    /// The output is `ciphertext || auth_tag (16 bytes)`; the nonce is not included
    /// and must be stored by the caller.
    pub fn encrypt(
        &self,
        nonce: &[u8; NONCE_SIZE],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, ContentKeyError> {
        self.cipher()
            .encrypt(Nonce::from_slice(nonce), plaintext)
            .map_err(|_| ContentKeyError::Encrypt)
    }

    /// Decrypt `ciphertext || auth_tag` with AES-256-GCM
    ///
    /// The tag is verified before any plaintext is released.
    pub fn decrypt(
        &self,
        nonce: &[u8; NONCE_SIZE],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, ContentKeyError> {
        self.cipher()
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| ContentKeyError::Decrypt)
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.0))
    }
}
