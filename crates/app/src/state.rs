use std::{fs, path::Path, path::PathBuf};

use common::advice::AdviceConfig;
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "sealbox";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// On-disk configuration. Keys are never stored here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where security tips come from
    #[serde(default)]
    pub advice: AdviceConfig,
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the sealbox directory (~/.sealbox)
    pub sealbox_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the sealbox directory path (custom or default ~/.sealbox)
    pub fn sealbox_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new sealbox directory with a config file
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let sealbox_dir = Self::sealbox_dir(custom_path)?;

        if sealbox_dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&sealbox_dir)?;

        let config = config.unwrap_or_default();
        let config_path = sealbox_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        write_private(&config_path, &config_toml)?;

        Ok(Self {
            sealbox_dir,
            config_path,
            config,
        })
    }

    /// Load existing state from the sealbox directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let sealbox_dir = Self::sealbox_dir(custom_path)?;

        if !sealbox_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_path = sealbox_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            sealbox_dir,
            config_path,
            config,
        })
    }

    /// Load existing state, or fall back to defaults if `init` was never run
    ///
    /// Sealing and opening must work on a fresh machine, so only a config that
    /// exists but cannot be read is an error.
    pub fn load_or_default(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let sealbox_dir = Self::sealbox_dir(custom_path)?;
        match Self::load(Some(sealbox_dir.clone())) {
            Err(StateError::NotInitialized) | Err(StateError::MissingFile(_)) => {
                tracing::debug!(dir = %sealbox_dir.display(), "no config found, using defaults");
                Ok(Self {
                    config_path: sealbox_dir.join(CONFIG_FILE_NAME),
                    sealbox_dir,
                    config: AppConfig::default(),
                })
            }
            other => other,
        }
    }
}

/// The config may hold an API key, so keep it owner-readable only
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    fs::write(path, contents)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("sealbox directory not initialized. Run 'sealbox init' first")]
    NotInitialized,

    #[error("sealbox directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
