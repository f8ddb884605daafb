//! Client configuration loader.
//!
//! Reads `config.toml` from the config directory (`~/.carcare/` by default)
//! into [`ClientConfig`], then applies the backend URL override from the
//! command line or the `BACKEND_URL` environment variable.

use std::path::{Path, PathBuf};

use carcare_types::config::ClientConfig;
use carcare_types::error::ConfigError;

/// File name inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable that relocates the config directory.
pub const CONFIG_DIR_ENV: &str = "CARCARE_CONFIG_DIR";

/// Resolve the config directory from environment or platform defaults.
///
/// Priority:
/// 1. `CARCARE_CONFIG_DIR` environment variable
/// 2. `~/.carcare`
/// 3. `./.carcare` when no home directory is known
pub fn resolve_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".carcare");
    }

    PathBuf::from(".carcare")
}

/// Load `{config_dir}/config.toml`.
///
/// - Missing file: [`ClientConfig::default()`].
/// - Unreadable or malformed file: an error naming the path.
pub async fn load_config(config_dir: &Path) -> Result<ClientConfig, ConfigError> {
    let config_path = config_dir.join(CONFIG_FILE);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return Ok(ClientConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: config_path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    toml::from_str::<ClientConfig>(&content).map_err(|err| ConfigError::Parse {
        path: config_path.display().to_string(),
        message: err.to_string(),
    })
}

/// Load the config and apply the backend URL override.
///
/// `backend_override` carries `--backend-url` / `BACKEND_URL` (clap merges
/// the two); it wins over the file. The resulting URL is validated here so a
/// typo fails before any request is attempted.
pub async fn load_client_config(
    config_dir: &Path,
    backend_override: Option<&str>,
) -> Result<ClientConfig, ConfigError> {
    let config = load_config(config_dir)
        .await?
        .with_backend_override(backend_override);
    config.normalized_backend_url()?;
    tracing::debug!(backend_url = %config.backend_url, "resolved client config");
    Ok(config)
}
