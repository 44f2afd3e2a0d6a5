use std::{fs, path::Path, path::PathBuf};

use common::credentials::{CredentialProvider, Credentials};
use serde::{Deserialize, Serialize};
use url::Url;

pub const APP_NAME: &str = "lpl";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const SECRET_FILE_NAME: &str = "secret.key";

pub const DEFAULT_API_HOST: &str = "http://services.uplynk.com";
pub const DEFAULT_PLAYBACK_PREFIX: &str = "https://content.uplynk.com/playlist";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Account owner id sent as `_owner` in every signed message
    #[serde(default)]
    pub owner_id: String,
    /// Base URL of the playlist API
    #[serde(default = "default_api_host")]
    pub api_host: Url,
    /// Prefix for signed playback URLs
    #[serde(default = "default_playback_prefix")]
    pub playback_prefix: String,
    /// Ad configuration passed as `ad` on playback URLs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_config: Option<String>,
}

fn default_api_host() -> Url {
    Url::parse(DEFAULT_API_HOST).expect("hardcoded URL must parse")
}

fn default_playback_prefix() -> String {
    DEFAULT_PLAYBACK_PREFIX.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            owner_id: String::new(),
            api_host: default_api_host(),
            playback_prefix: default_playback_prefix(),
            ad_config: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the lpl directory (~/.lpl)
    pub lpl_dir: PathBuf,
    /// Path to the secret key file
    pub secret_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the lpl directory path (custom or default ~/.lpl)
    pub fn lpl_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    pub fn exists(custom_path: Option<PathBuf>) -> Result<bool, StateError> {
        let lpl_dir = Self::lpl_dir(custom_path)?;
        Ok(lpl_dir.join(CONFIG_FILE_NAME).exists())
    }

    /// Initialize a new lpl directory holding the config and the secret key
    pub fn init(
        custom_path: Option<PathBuf>,
        config: AppConfig,
        secret_key: &str,
    ) -> Result<Self, StateError> {
        let lpl_dir = Self::lpl_dir(custom_path)?;
        let config_path = lpl_dir.join(CONFIG_FILE_NAME);
        let secret_path = lpl_dir.join(SECRET_FILE_NAME);

        if config_path.exists() {
            return Err(StateError::AlreadyInitialized);
        }
        if config.owner_id.is_empty() {
            return Err(StateError::MissingValue("owner id"));
        }
        if secret_key.trim().is_empty() {
            return Err(StateError::MissingValue("secret key"));
        }

        fs::create_dir_all(&lpl_dir)?;

        write_secret(&secret_path, secret_key.trim())?;

        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        tracing::debug!(dir = %lpl_dir.display(), "initialized config directory");

        Ok(Self {
            lpl_dir,
            secret_path,
            config_path,
            config,
        })
    }

    /// Load existing state from the lpl directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let lpl_dir = Self::lpl_dir(custom_path)?;
        let config_path = lpl_dir.join(CONFIG_FILE_NAME);
        let secret_path = lpl_dir.join(SECRET_FILE_NAME);

        if !config_path.exists() {
            return Err(StateError::NotInitialized);
        }
        if !secret_path.exists() {
            return Err(StateError::MissingFile(SECRET_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            lpl_dir,
            secret_path,
            config_path,
            config,
        })
    }

    /// Load the secret key from the key file
    pub fn load_secret(&self) -> Result<Vec<u8>, StateError> {
        let secret = fs::read_to_string(&self.secret_path)?;
        Ok(secret.trim().as_bytes().to_vec())
    }

    /// Credentials from the config directory
    pub fn credentials(&self) -> Result<Credentials, StateError> {
        Ok(Credentials::new(
            self.config.owner_id.clone(),
            self.load_secret()?,
        ))
    }
}

#[cfg(unix)]
fn write_secret(path: &Path, secret: &str) -> Result<(), StateError> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(secret.as_bytes())?;
    Ok(())
}

#[cfg(not(unix))]
fn write_secret(path: &Path, secret: &str) -> Result<(), StateError> {
    fs::write(path, secret)?;
    Ok(())
}

/// Everything an op needs to talk to the API, resolved for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_host: Url,
    pub playback_prefix: String,
    pub ad_config: Option<String>,
    pub credentials: Credentials,
}

impl Settings {
    /// Resolve settings from the config directory (if any), environment
    /// credentials and an optional `--remote` override.
    ///
    /// Environment credentials win over the files. A missing config directory
    /// is fine as long as the environment carries the credentials; anything
    /// still empty is reported when the first request is signed.
    pub fn resolve(config_path: Option<PathBuf>, remote: Option<Url>) -> Result<Self, StateError> {
        Self::resolve_with(config_path, remote, Credentials::from_env())
    }

    pub fn resolve_with(
        config_path: Option<PathBuf>,
        remote: Option<Url>,
        env_credentials: Credentials,
    ) -> Result<Self, StateError> {
        let (config, file_credentials) = match AppState::load(config_path) {
            Ok(state) => {
                let credentials = state.credentials()?;
                (state.config, credentials)
            }
            Err(StateError::NotInitialized) => {
                tracing::debug!("no config directory, using defaults");
                (AppConfig::default(), Credentials::new("", ""))
            }
            Err(e) => return Err(e),
        };

        let credentials = file_credentials.overlay(env_credentials);
        if !credentials.is_complete() {
            tracing::warn!(
                owner_id_set = !credentials.owner_id().is_empty(),
                secret_set = !credentials.secret_key().is_empty(),
                "credentials are incomplete"
            );
        }

        Ok(Self {
            api_host: remote.unwrap_or(config.api_host),
            playback_prefix: config.playback_prefix,
            ad_config: config.ad_config,
            credentials,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("lpl directory not initialized. Run 'lpl init' first")]
    NotInitialized,

    #[error("lpl directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("{0} must not be empty")]
    MissingValue(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
