use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::crypto::{self, EnvelopeError, PublicKey, SecretKey};

/// Extension appended to every sealed file
pub const ENCRYPTED_EXTENSION: &str = "enc";
/// Extension appended when opening a file that lacks [`ENCRYPTED_EXTENSION`]
pub const DECRYPTED_FALLBACK_EXTENSION: &str = "dec";

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
    #[error("crypto task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Name a sealed file: the full original name plus `.enc`
///
/// `report.pdf` becomes `report.pdf.enc`.
pub fn encrypted_file_name(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".");
    name.push(ENCRYPTED_EXTENSION);
    PathBuf::from(name)
}

/// Name an opened file by stripping the trailing `.enc`
///
/// A path without the suffix gets `.dec` appended instead, so an opened file never
/// lands on top of its input.
pub fn decrypted_file_name(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext == ENCRYPTED_EXTENSION && path.file_stem().is_some() => {
            path.with_extension("")
        }
        _ => {
            let mut name: OsString = path.as_os_str().to_owned();
            name.push(".");
            name.push(DECRYPTED_FALLBACK_EXTENSION);
            PathBuf::from(name)
        }
    }
}

/// Seal a file for `recipient` and write the bundle next to it (or to `output`)
///
/// The file is read fully into memory; the cipher pass runs on the blocking pool so
/// the caller's executor is never stalled. Nothing is written unless sealing succeeds.
///
/// Returns the path the bundle was written to.
pub async fn seal_file(
    input: &Path,
    recipient: &PublicKey,
    output: Option<&Path>,
) -> Result<PathBuf, FileError> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| encrypted_file_name(input));

    let plaintext = read(input).await?;
    tracing::debug!(input = %input.display(), len = plaintext.len(), "sealing file");

    let recipient = *recipient;
    let bundle =
        tokio::task::spawn_blocking(move || crypto::seal(&plaintext, &recipient)).await??;

    write(&output, &bundle).await?;
    tracing::info!(output = %output.display(), "sealed file written");
    Ok(output)
}

/// Open a sealed file with `secret` and write the plaintext next to it (or to `output`)
///
/// Returns the path the plaintext was written to.
pub async fn open_file(
    input: &Path,
    secret: &SecretKey,
    output: Option<&Path>,
) -> Result<PathBuf, FileError> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| decrypted_file_name(input));

    let bundle = read(input).await?;
    tracing::debug!(input = %input.display(), len = bundle.len(), "opening file");

    let secret = secret.clone();
    let plaintext = tokio::task::spawn_blocking(move || crypto::open(&bundle, &secret)).await??;

    write(&output, &plaintext).await?;
    tracing::info!(output = %output.display(), "opened file written");
    Ok(output)
}

async fn read(path: &Path) -> Result<Vec<u8>, FileError> {
    tokio::fs::read(path).await.map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

async fn write(path: &Path, data: &[u8]) -> Result<(), FileError> {
    tokio::fs::write(path, data)
        .await
        .map_err(|source| FileError::Io {
            path: path.to_path_buf(),
            source,
        })
}
