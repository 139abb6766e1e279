use anyhow::Context;
use prism_api::ApiClient;
use prism_config::PrismConfig;

/// Everything a command handler needs: the configuration and the backend
/// the configuration selected.
pub struct AppContext {
    pub config: PrismConfig,
    pub client: ApiClient,
}

impl AppContext {
    /// Build the context. Fails with a login hint when no credential is
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns an error when no API key can be loaded or the HTTP client
    /// fails to build.
    pub fn init(config: PrismConfig) -> anyhow::Result<Self> {
        let api_key = prism_auth::load().ok_or(prism_auth::AuthError::NotAuthenticated)?;
        let client = ApiClient::from_config(&config, api_key)
            .context("failed to initialize API client")?;
        Ok(Self { config, client })
    }
}
