use std::path::PathBuf;

use clap::Args;
use zeroize::Zeroizing;

use common::crypto::{KeyError, SecretKey};
use common::file::{open_file, FileError};

use super::key_source::{read_key_text, KeySourceError};

#[derive(Args, Clone)]
#[command(group(
    clap::ArgGroup::new("identity")
        .required(true)
        .args(["private_key", "private_key_file"]),
))]
pub struct Decrypt {
    /// Sealed file to open
    pub file: PathBuf,

    /// Your private key (base64 PKCS#8 or PEM)
    #[arg(long)]
    pub private_key: Option<String>,

    /// Read your private key from a file
    #[arg(long)]
    pub private_key_file: Option<PathBuf>,

    /// Where to write the plaintext (default: <FILE> without .enc)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl std::fmt::Debug for Decrypt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decrypt")
            .field("file", &self.file)
            .field("private_key", &self.private_key.as_ref().map(|_| "[REDACTED]"))
            .field("private_key_file", &self.private_key_file)
            .field("output", &self.output)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecryptError {
    #[error(transparent)]
    KeySource(#[from] KeySourceError),
    #[error("invalid private key: {0}")]
    Key(#[from] KeyError),
    #[error("decrypt failed: {0}")]
    File(#[from] FileError),
}

#[async_trait::async_trait]
impl crate::op::Op for Decrypt {
    type Error = DecryptError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let text: Zeroizing<String> = read_key_text(
            self.private_key.as_deref(),
            self.private_key_file.as_deref(),
            "private-key",
        )
        .await?;
        let secret = SecretKey::from_text(&text)?;

        let written = open_file(&self.file, &secret, self.output.as_deref()).await?;

        Ok(format!("Opened {} -> {}", self.file.display(), written.display()))
    }
}
