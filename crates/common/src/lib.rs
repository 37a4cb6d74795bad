/**
 * Pluggable sources of human-readable security tips.
 *  A remote text-generation backend with a static
 *  fallback, fully decoupled from sealing.
 */
pub mod advice;
/**
 * Cryptographic types and operations.
 *  - P-256 key pairs and their portable encodings
 *  - Envelope sealing (ECDH + AES-256-GCM)
 *  - The binary bundle format
 */
pub mod crypto;
/**
 * Async file boundary over the envelope codec,
 *  including the encrypted file naming convention.
 */
pub mod file;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::advice::{AdviceConfig, AdviceSource};
    pub use crate::crypto::{open, seal, Bundle, EnvelopeError, KeyPair, PublicKey, SecretKey};
    pub use crate::file::{open_file, seal_file};
    pub use crate::version::BuildInfo;
}
