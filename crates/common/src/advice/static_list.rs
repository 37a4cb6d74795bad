use rand::seq::IndexedRandom;

use super::AdviceSource;

/// Built-in tips served when no remote source is configured, or when it fails
pub const STATIC_TIPS: &[&str] = &[
    "ECC P-256 offers security comparable to RSA-3072 with much shorter keys and faster operations.",
    "AES-GCM is an authenticated mode: it provides both confidentiality and an integrity check.",
    "The private key is the only way to recover your data. If it is lost, sealed files cannot be recovered.",
    "All sealing and opening happens locally on this device; no file or key ever reaches a server.",
    "For highly sensitive files, consider disconnecting from the network while you encrypt them.",
];

/// Serves a uniformly random tip from [`STATIC_TIPS`], ignoring the topic
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticAdvice;

impl StaticAdvice {
    pub fn random_tip() -> &'static str {
        STATIC_TIPS
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(STATIC_TIPS[0])
    }
}

#[async_trait::async_trait]
impl AdviceSource for StaticAdvice {
    async fn tip(&self, _topic: &str) -> String {
        Self::random_tip().to_string()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_random_tip_is_from_list() {
        for _ in 0..32 {
            assert!(STATIC_TIPS.contains(&StaticAdvice::random_tip()));
        }
    }

    #[tokio::test]
    async fn test_static_source() {
        let tip = StaticAdvice.tip("file security").await;
        assert!(!tip.is_empty());
        assert!(STATIC_TIPS.contains(&tip.as_str()));
    }
}
