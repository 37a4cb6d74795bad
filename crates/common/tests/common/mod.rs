//! Shared test utilities for envelope and file tests
#![allow(dead_code)]

use ::common::crypto::{seal, KeyPair};
use tempfile::TempDir;

/// Deterministic, non-repeating-looking test payload of `len` bytes
pub fn payload(len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| (i.wrapping_mul(31) ^ (i >> 8)) as u8)
        .collect()
}

/// Generate a recipient and seal `plaintext` for it
pub fn sealed(plaintext: &[u8]) -> (Vec<u8>, KeyPair) {
    let pair = KeyPair::generate().unwrap();
    let bundle = seal(plaintext, &pair.public).unwrap();
    (bundle, pair)
}

/// Set up a temp directory containing a single plaintext file
pub fn setup_file(name: &str, contents: &[u8]) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (temp_dir, path)
}
