//! Cryptographic primitives for SealBox
//!
//! This module provides everything needed to seal a file for a recipient and open it
//! again, entirely offline:
//!
//! - **Key pairs**: NIST P-256 keys, exported as base64 SPKI / PKCS#8 text
//! - **Envelope**: ephemeral-static ECDH + AES-256-GCM ([`seal`] / [`open`])
//! - **Bundle**: the fixed binary container a sealed file is written as
//!
//! # Security Model
//!
//! ## Recipient Keys
//! A recipient generates a `KeyPair` and hands out the public half. The secret half is
//! shown once and never stored by this crate; losing it makes every bundle sealed for
//! the pair unrecoverable.
//!
//! ## Content Encryption
//! Every call to [`seal`] generates a fresh ephemeral keypair, so every bundle is
//! encrypted under its own AES-256-GCM key. The GCM tag covers the whole ciphertext.
//!
//! ## Compatibility
//! Bundles match the layout and key derivation of WebCrypto's
//! `ECDH (P-256) deriveKey -> AES-GCM 256`, so bundles produced by a browser using the
//! same scheme open here and vice versa.

mod bundle;
mod content_key;
mod envelope;
mod keys;

pub use bundle::{
    Bundle, BundleError, CIPHERTEXT_OFFSET, EPHEMERAL_KEY_LEN_PREFIX, EPHEMERAL_PUBLIC_KEY_SIZE,
    MIN_BUNDLE_SIZE, NONCE_OFFSET,
};
pub use content_key::{NONCE_SIZE, TAG_SIZE};
pub use envelope::{open, open_with_text, seal, seal_with_text, EnvelopeError};
pub use keys::{
    KeyError, KeyPair, PublicKey, SecretKey, CURVE_NAME, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE,
};
