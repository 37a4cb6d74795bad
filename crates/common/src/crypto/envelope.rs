//! Hybrid envelope encryption using ECDH + AES-256-GCM
//!
//! # Protocol Overview
//!
//! To seal a file for a recipient:
//! 1. **Generate ephemeral keypair**: Create a one-shot P-256 keypair
//! 2. **Perform ECDH**: Ephemeral private key x recipient public key
//! 3. **Derive content key**: The shared x-coordinate becomes the AES-256 key
//! 4. **Encrypt**: AES-256-GCM under a fresh 12 byte nonce, no associated data
//! 5. **Package**: Write a [`Bundle`] carrying the ephemeral public key and nonce
//!
//! The recipient opens the bundle by:
//! 1. **Extract ephemeral key**: Read the ephemeral public key from the bundle
//! 2. **Perform ECDH**: Recipient private key x ephemeral public key
//! 3. **Decrypt**: AES-256-GCM verifies the tag before releasing any plaintext
//!
//! # Security Properties
//!
//! - **Confidentiality + integrity**: Any bit flip in the bundle fails decryption
//! - **Fresh keys**: Every call uses a new ephemeral key, so content keys never repeat
//!   and sealing the same file twice yields unrelated bundles
//! - **No oracle**: Wrong key and tampered ciphertext produce the same error
//! - **No sender authentication**: Anyone with the public key can seal

use p256::ecdh::diffie_hellman;

use super::bundle::{Bundle, BundleError};
use super::content_key::{ContentKey, ContentKeyError};
use super::keys::{KeyError, PublicKey, SecretKey};

/// Errors that can occur while sealing or opening a bundle
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("invalid key: {0}")]
    InvalidKey(KeyError),
    #[error("malformed bundle: {0}")]
    MalformedBundle(String),
    #[error("decryption failed: wrong key or corrupted data")]
    DecryptionFailed,
    #[error("cryptography unavailable: {0}")]
    CryptoUnavailable(getrandom::Error),
    #[error("encryption failed")]
    EncryptionFailed,
}

impl From<KeyError> for EnvelopeError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::CryptoUnavailable(e) => EnvelopeError::CryptoUnavailable(e),
            other => EnvelopeError::InvalidKey(other),
        }
    }
}

impl From<BundleError> for EnvelopeError {
    fn from(err: BundleError) -> Self {
        EnvelopeError::MalformedBundle(err.to_string())
    }
}

impl From<ContentKeyError> for EnvelopeError {
    fn from(err: ContentKeyError) -> Self {
        match err {
            ContentKeyError::CryptoUnavailable(e) => EnvelopeError::CryptoUnavailable(e),
            ContentKeyError::Encrypt => EnvelopeError::EncryptionFailed,
            ContentKeyError::Decrypt => EnvelopeError::DecryptionFailed,
        }
    }
}

/// Seal `plaintext` so that only the holder of the secret key matching
/// `recipient` can open it
///
/// # Errors
///
/// Returns an error if the OS cannot supply randomness or the cipher fails.
/// Nothing partial is ever returned.
///
/// # Examples
///
/// ```ignore
/// let pair = KeyPair::generate()?;
/// let bundle = seal(b"attack at dawn", &pair.public)?;
/// let recovered = open(&bundle, &pair.secret)?;
/// assert_eq!(recovered, b"attack at dawn");
/// ```
#[tracing::instrument(skip_all, fields(plaintext_len = plaintext.len()))]
pub fn seal(plaintext: &[u8], recipient: &PublicKey) -> Result<Vec<u8>, EnvelopeError> {
    // Ephemeral keypair, dropped (and zeroized) when this call returns
    let ephemeral = SecretKey::generate()?;
    let ephemeral_public = ephemeral.public().to_raw();

    let shared = diffie_hellman(ephemeral.to_nonzero_scalar(), recipient.as_affine());
    let content_key = ContentKey::from(&shared);

    let nonce = ContentKey::generate_nonce()?;
    let ciphertext = content_key.encrypt(&nonce, plaintext)?;

    let bundle = Bundle {
        ephemeral_public: &ephemeral_public,
        nonce: &nonce,
        ciphertext: &ciphertext,
    }
    .encode();

    tracing::debug!(bundle_len = bundle.len(), "sealed bundle");
    Ok(bundle)
}

/// Open a sealed bundle with the recipient's secret key
///
/// # Errors
///
/// Returns an error if:
/// - The bundle is structurally invalid ([`EnvelopeError::MalformedBundle`])
/// - The embedded ephemeral key is not a valid point ([`EnvelopeError::MalformedBundle`])
/// - The tag does not verify, because the key is wrong or the data was altered
///   ([`EnvelopeError::DecryptionFailed`])
#[tracing::instrument(skip_all, fields(bundle_len = bundle.len()))]
pub fn open(bundle: &[u8], recipient: &SecretKey) -> Result<Vec<u8>, EnvelopeError> {
    let bundle = Bundle::parse(bundle)?;
    open_bundle(&bundle, recipient)
}

/// Seal `plaintext` for a recipient given as portable key text
///
/// The text may be base64 SPKI DER or a PEM block.
pub fn seal_with_text(plaintext: &[u8], public_key_text: &str) -> Result<Vec<u8>, EnvelopeError> {
    let recipient = PublicKey::from_text(public_key_text)?;
    seal(plaintext, &recipient)
}

/// Open a bundle with a secret key given as portable key text
///
/// The bundle structure is checked before the key text is decoded, so a
/// truncated bundle reports [`EnvelopeError::MalformedBundle`] regardless of the key.
pub fn open_with_text(bundle: &[u8], private_key_text: &str) -> Result<Vec<u8>, EnvelopeError> {
    let bundle = Bundle::parse(bundle)?;
    let recipient = SecretKey::from_text(private_key_text)?;
    open_bundle(&bundle, &recipient)
}

fn open_bundle(bundle: &Bundle<'_>, recipient: &SecretKey) -> Result<Vec<u8>, EnvelopeError> {
    let ephemeral_public = PublicKey::from_raw(bundle.ephemeral_public)
        .map_err(|e| EnvelopeError::MalformedBundle(format!("ephemeral key: {}", e)))?;

    let shared = diffie_hellman(recipient.to_nonzero_scalar(), ephemeral_public.as_affine());
    let content_key = ContentKey::from(&shared);

    let plaintext = content_key.decrypt(bundle.nonce, bundle.ciphertext)?;

    tracing::debug!(plaintext_len = plaintext.len(), "opened bundle");
    Ok(plaintext)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::bundle::{CIPHERTEXT_OFFSET, MIN_BUNDLE_SIZE};
    use crate::crypto::keys::KeyPair;

    #[test]
    fn test_seal_open() {
        let pair = KeyPair::generate().unwrap();
        let data = b"hello world, this is a test message for sealing";

        let bundle = seal(data, &pair.public).unwrap();
        assert_eq!(bundle.len(), MIN_BUNDLE_SIZE + data.len());

        let recovered = open(&bundle, &pair.secret).unwrap();
        assert_eq!(recovered, data);
    }

    #[test]
    fn test_bundle_embeds_ephemeral_key_not_recipient() {
        let pair = KeyPair::generate().unwrap();
        let bundle = seal(b"x", &pair.public).unwrap();
        let parsed = Bundle::parse(&bundle).unwrap();

        assert_eq!(parsed.ephemeral_public[0], 0x04);
        assert_ne!(parsed.ephemeral_public, pair.public.to_raw().as_slice());
    }

    #[test]
    fn test_seal_with_text() {
        let pair = KeyPair::generate().unwrap();
        let (public_text, private_text) = pair.to_text().unwrap();

        let bundle = seal_with_text(b"via text", &public_text).unwrap();
        let recovered = open_with_text(&bundle, &private_text).unwrap();
        assert_eq!(recovered, b"via text");
    }

    #[test]
    fn test_invalid_key_text() {
        assert!(matches!(
            seal_with_text(b"data", "definitely not base64!"),
            Err(EnvelopeError::InvalidKey(_))
        ));

        let pair = KeyPair::generate().unwrap();
        let bundle = seal(b"data", &pair.public).unwrap();
        assert!(matches!(
            open_with_text(&bundle, "AAAA"),
            Err(EnvelopeError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_bundle_checked_before_key() {
        assert!(matches!(
            open_with_text(&[65u8; 10], "AAAA"),
            Err(EnvelopeError::MalformedBundle(_))
        ));
    }

    #[test]
    fn test_off_curve_ephemeral_key() {
        let pair = KeyPair::generate().unwrap();
        let mut bundle = seal(b"data", &pair.public).unwrap();
        // Corrupt the y coordinate of the embedded point
        bundle[CIPHERTEXT_OFFSET - 13] ^= 0x01;

        assert!(matches!(
            open(&bundle, &pair.secret),
            Err(EnvelopeError::MalformedBundle(_))
        ));
    }

    #[test]
    fn test_wrong_key_is_decryption_failure() {
        let alice = KeyPair::generate().unwrap();
        let bob = KeyPair::generate().unwrap();
        let bundle = seal(b"for alice only", &alice.public).unwrap();

        assert!(matches!(
            open(&bundle, &bob.secret),
            Err(EnvelopeError::DecryptionFailed)
        ));
    }
}
