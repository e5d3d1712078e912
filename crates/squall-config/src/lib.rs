//! Configuration and token storage for the squall CLI.
//!
//! TOML profiles (backend URL, output defaults) loaded through figment,
//! plus [`TokenStore`]: the durable [`squall_core::TokenSlot`] backing the
//! session. Tokens resolve env var first, then the system keyring, then a
//! mode-0600 file under the config directory.

use std::collections::HashMap;
use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use squall_core::{CoreError, TokenSlot};

/// Environment variable holding an ephemeral bearer token. Read-only: it is
/// never written back and never cleared by logout.
pub const TOKEN_ENV: &str = "SQUALL_TOKEN";

const KEYRING_SERVICE: &str = "squall";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("unknown profile '{profile}'")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl From<ConfigError> for CoreError {
    fn from(err: ConfigError) -> Self {
        CoreError::Config {
            message: err.to_string(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Resolve a profile by explicit name or the configured default. An
    /// unconfigured "default" profile falls back to [`Profile::default`],
    /// so the CLI works against a local backend with zero setup.
    pub fn profile(&self, name: Option<&str>) -> Result<(String, Profile), ConfigError> {
        let name = name
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into());

        if let Some(profile) = self.profiles.get(&name) {
            return Ok((name, profile.clone()));
        }
        if name == "default" {
            return Ok((name, Profile::default()));
        }
        Err(ConfigError::UnknownProfile { profile: name })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named backend profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Username hint for verification resends and prompts.
    pub username: Option<String>,

    /// Override request timeout in seconds.
    pub timeout: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            username: None,
            timeout: None,
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:8080".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config directory via XDG / platform conventions.
pub fn config_dir() -> PathBuf {
    ProjectDirs::from("com", "squall", "squall")
        .map_or_else(dirs_fallback, |dirs| dirs.config_dir().to_path_buf())
}

/// Resolve the config file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("squall");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from file + environment (`SQUALL_*` overrides).
pub fn load_config() -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("SQUALL_CONFIG_").split("__"));

    Ok(figment.extract()?)
}

/// Load config, returning defaults if the file doesn't exist or is broken.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

// ── Token storage ───────────────────────────────────────────────────

/// Durable single-slot token storage for one profile.
///
/// Load precedence: `SQUALL_TOKEN` env var (ephemeral, read-only), then the
/// system keyring, then a token file under the config directory. Stores go
/// to the keyring when it is available and fall back to the file; clears
/// remove both.
pub struct TokenStore {
    profile: String,
    dir: PathBuf,
    use_keyring: bool,
}

impl TokenStore {
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            dir: config_dir(),
            use_keyring: true,
        }
    }

    /// File-only store rooted at `dir`. Used by tests and by environments
    /// without a usable keyring daemon.
    pub fn file_only(profile: impl Into<String>, dir: PathBuf) -> Self {
        Self {
            profile: profile.into(),
            dir,
            use_keyring: false,
        }
    }

    fn keyring_entry(&self) -> Option<keyring::Entry> {
        if !self.use_keyring {
            return None;
        }
        keyring::Entry::new(KEYRING_SERVICE, &format!("{}/token", self.profile)).ok()
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(format!("{}.token", self.profile))
    }

    fn read_file(&self) -> Result<Option<SecretString>, CoreError> {
        match std::fs::read_to_string(self.token_path()) {
            Ok(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(SecretString::from(trimmed.to_owned())))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::Config {
                message: format!("failed to read token file: {e}"),
            }),
        }
    }

    fn write_file(&self, token: &SecretString) -> Result<(), CoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| CoreError::Config {
            message: format!("failed to create config dir: {e}"),
        })?;
        let path = self.token_path();
        std::fs::write(&path, token.expose_secret()).map_err(|e| CoreError::Config {
            message: format!("failed to write token file: {e}"),
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).map_err(
                |e| CoreError::Config {
                    message: format!("failed to restrict token file permissions: {e}"),
                },
            )?;
        }
        Ok(())
    }

    fn remove_file(&self) -> Result<(), CoreError> {
        match std::fs::remove_file(self.token_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Config {
                message: format!("failed to remove token file: {e}"),
            }),
        }
    }
}

impl TokenSlot for TokenStore {
    fn load(&self) -> Result<Option<SecretString>, CoreError> {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                debug!("using token from {TOKEN_ENV}");
                return Ok(Some(SecretString::from(token)));
            }
        }
        if let Some(entry) = self.keyring_entry() {
            match entry.get_password() {
                Ok(token) => return Ok(Some(SecretString::from(token))),
                Err(keyring::Error::NoEntry) => {}
                Err(e) => debug!(error = %e, "keyring unavailable, trying token file"),
            }
        }
        self.read_file()
    }

    fn store(&self, token: &SecretString) -> Result<(), CoreError> {
        if let Some(entry) = self.keyring_entry() {
            if entry.set_password(token.expose_secret()).is_ok() {
                // Drop any stale file copy so the keyring stays canonical.
                self.remove_file()?;
                return Ok(());
            }
            debug!("keyring store failed, falling back to token file");
        }
        self.write_file(token)
    }

    fn clear(&self) -> Result<(), CoreError> {
        if let Some(entry) = self.keyring_entry() {
            match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => debug!(error = %e, "keyring clear failed"),
            }
        }
        self.remove_file()
    }
}
