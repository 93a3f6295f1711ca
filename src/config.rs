//! TOML configuration.
//!
//! Defaults are compiled in from `config/refiner.toml`. A user file replaces
//! them wholesale: the path in `PROMPT_REFINER_CONFIG` if set, otherwise
//! `<data_dir>/prompt-refiner/config.toml` if it exists.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const DEFAULT_CONFIG: &str = include_str!("../config/refiner.toml");

pub const CONFIG_ENV_VAR: &str = "PROMPT_REFINER_CONFIG";
const APP_DIR_NAME: &str = "prompt-refiner";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinerConfig {
    pub api: ApiConfig,
    pub models: ModelsConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelsConfig {
    pub default: String,
    pub available: Vec<ModelInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file name, relative to the data directory.
    pub database: String,
    pub history_key: String,
    pub credential_key: String,
    #[serde(default = "CredentialBackend::platform_default")]
    pub credential_backend: CredentialBackend,
    pub keychain_service: String,
}

/// Where the API key lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialBackend {
    Keychain,
    Database,
}

impl CredentialBackend {
    /// Keychain where the OS keychain is available, the database elsewhere.
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            CredentialBackend::Keychain
        } else {
            CredentialBackend::Database
        }
    }

    /// The backend actually used. `keyring` is only built with macOS support;
    /// on other platforms it would not keep a saved key, so a configured
    /// `keychain` falls back to the database.
    pub fn effective(self) -> Self {
        if self == CredentialBackend::Keychain && !cfg!(target_os = "macos") {
            warn!("Keychain storage is only supported on macOS, storing the API key in the database");
            return CredentialBackend::Database;
        }
        self
    }
}

impl RefinerConfig {
    /// Check cross-field constraints serde can't express.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            bail!("api.base_url must not be empty");
        }
        if self.models.available.is_empty() {
            bail!("models.available must list at least one model");
        }
        if self.find_model(&self.models.default).is_none() {
            bail!(
                "models.default '{}' is not in models.available",
                self.models.default
            );
        }
        if self.storage.history_key.is_empty() || self.storage.credential_key.is_empty() {
            bail!("storage keys must not be empty");
        }
        if self.storage.history_key == self.storage.credential_key {
            bail!("storage.history_key and storage.credential_key must differ");
        }
        Ok(())
    }

    pub fn find_model(&self, id: &str) -> Option<&ModelInfo> {
        self.models.available.iter().find(|m| m.id == id)
    }

    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.storage.database)
    }
}

/// The embedded defaults.
///
/// # Panics
/// Panics if the embedded TOML is invalid (a build-time bug).
pub fn default_config() -> RefinerConfig {
    toml::from_str(DEFAULT_CONFIG).expect("embedded refiner.toml must be valid TOML")
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<RefinerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    let config: RefinerConfig = toml::from_str(&content)
        .with_context(|| format!("Invalid config file {:?}", path))?;
    config.validate()?;
    info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Per-user data directory: `prompt-refiner` under the platform data dir
/// (`~/.local/share` on Linux, `~/Library/Application Support` on macOS).
pub fn data_dir() -> Result<PathBuf> {
    match dirs::data_dir() {
        Some(dir) => Ok(dir.join(APP_DIR_NAME)),
        None => bail!("Could not determine the user data directory"),
    }
}

/// Resolve the effective config: env override, then user file, then defaults.
pub fn resolve_config() -> Result<RefinerConfig> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config(Path::new(&path));
    }

    let user_file = data_dir()?.join(CONFIG_FILE_NAME);
    if user_file.exists() {
        return load_config(&user_file);
    }

    debug!("No config file found, using defaults");
    Ok(default_config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = default_config();
        config.validate().unwrap();
        assert!(config.find_model(&config.models.default).is_some());
        assert_eq!(
            config.storage.credential_backend,
            CredentialBackend::platform_default()
        );
    }

    #[test]
    fn test_effective_backend_persists_on_this_platform() {
        let effective = CredentialBackend::Keychain.effective();
        if cfg!(target_os = "macos") {
            assert_eq!(effective, CredentialBackend::Keychain);
        } else {
            assert_eq!(effective, CredentialBackend::Database);
        }
        assert_eq!(
            CredentialBackend::Database.effective(),
            CredentialBackend::Database
        );
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[api]
base_url = "http://localhost:8080/v1beta"

[models]
default = "local-model"

[[models.available]]
id = "local-model"
name = "Local"

[storage]
database = "test.db"
history_key = "h"
credential_key = "c"
credential_backend = "database"
keychain_service = "unused"
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/v1beta");
        assert_eq!(config.models.default, "local-model");
        assert_eq!(config.storage.credential_backend, CredentialBackend::Database);
        assert_eq!(
            config.database_path(Path::new("/data")),
            PathBuf::from("/data/test.db")
        );
    }

    #[test]
    fn test_omitted_credential_backend_uses_platform_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[api]
base_url = "http://localhost:8080/v1beta"

[models]
default = "m"

[[models.available]]
id = "m"
name = "M"

[storage]
database = "test.db"
history_key = "h"
credential_key = "c"
keychain_service = "svc"
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(
            config.storage.credential_backend,
            CredentialBackend::platform_default()
        );
    }

    #[test]
    fn test_default_model_must_be_available() {
        let mut config = default_config();
        config.models.default = "not-listed".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("not-listed"));
    }

    #[test]
    fn test_keys_must_differ() {
        let mut config = default_config();
        config.storage.credential_key = config.storage.history_key.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/refiner.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[api\nbase_url = ").unwrap();
        assert!(load_config(file.path()).is_err());
    }
}
