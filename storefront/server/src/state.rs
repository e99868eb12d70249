use std::sync::Arc;

use medica_client::ApiClient;

use super::config::Config;

pub struct AppState {
    pub config: Config,
    /// Cookie-less client; handlers derive a per-caller copy from it.
    pub api: ApiClient,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let api = ApiClient::new(&config.client);

        Arc::new(Self { config, api })
    }
}
