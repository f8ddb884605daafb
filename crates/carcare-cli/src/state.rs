//! Application state wiring config and the backend client together.
//!
//! AppState pins the core pages' generic backend to the concrete HTTP
//! adapter from `carcare-infra`.

use carcare_infra::config::{load_client_config, resolve_config_dir};
use carcare_infra::http::HttpBookingApi;
use carcare_types::config::ClientConfig;

/// Shared state for every command.
#[derive(Clone)]
pub struct AppState {
    pub api: HttpBookingApi,
    pub config: ClientConfig,
}

impl AppState {
    /// Resolve configuration and build the HTTP client.
    ///
    /// `backend_override` is the `--backend-url` flag or `BACKEND_URL`.
    pub async fn init(backend_override: Option<&str>) -> anyhow::Result<Self> {
        let config_dir = resolve_config_dir();
        let config = load_client_config(&config_dir, backend_override).await?;
        let api = HttpBookingApi::from_config(&config)?;

        tracing::debug!(
            backend = api.base_url(),
            config_dir = %config_dir.display(),
            "client initialized"
        );

        Ok(Self { api, config })
    }
}
