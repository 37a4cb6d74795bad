use std::path::PathBuf;

use clap::Args;

use common::crypto::{KeyError, PublicKey};
use common::file::{seal_file, FileError};

use super::key_source::{read_key_text, KeySourceError};

#[derive(Args, Debug, Clone)]
#[command(group(
    clap::ArgGroup::new("recipient")
        .required(true)
        .args(["public_key", "public_key_file"]),
))]
pub struct Encrypt {
    /// File to seal
    pub file: PathBuf,

    /// Recipient public key (base64 SPKI or PEM)
    #[arg(long)]
    pub public_key: Option<String>,

    /// Read the recipient public key from a file
    #[arg(long)]
    pub public_key_file: Option<PathBuf>,

    /// Where to write the sealed bundle (default: <FILE>.enc)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum EncryptError {
    #[error(transparent)]
    KeySource(#[from] KeySourceError),
    #[error("invalid public key: {0}")]
    Key(#[from] KeyError),
    #[error("encrypt failed: {0}")]
    File(#[from] FileError),
}

#[async_trait::async_trait]
impl crate::op::Op for Encrypt {
    type Error = EncryptError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let text = read_key_text(
            self.public_key.as_deref(),
            self.public_key_file.as_deref(),
            "public-key",
        )
        .await?;
        let recipient = PublicKey::from_text(&text)?;

        let written = seal_file(&self.file, &recipient, self.output.as_deref()).await?;

        Ok(format!("Sealed {} -> {}", self.file.display(), written.display()))
    }
}
