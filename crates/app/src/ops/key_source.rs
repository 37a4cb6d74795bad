use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

#[derive(Debug, thiserror::Error)]
pub enum KeySourceError {
    #[error("failed to read key file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("either --{0} or --{0}-file must be provided")]
    Missing(&'static str),
}

/// Resolve key text given inline or as a file path
///
/// `flag` names the CLI flag pair for the error message. The text is held in a
/// zeroizing buffer since it may be a private key.
pub async fn read_key_text(
    inline: Option<&str>,
    file: Option<&Path>,
    flag: &'static str,
) -> Result<Zeroizing<String>, KeySourceError> {
    if let Some(text) = inline {
        return Ok(Zeroizing::new(text.to_string()));
    }

    let Some(path) = file else {
        return Err(KeySourceError::Missing(flag));
    };

    tokio::fs::read_to_string(path)
        .await
        .map(Zeroizing::new)
        .map_err(|source| KeySourceError::Io {
            path: path.to_path_buf(),
            source,
        })
}
