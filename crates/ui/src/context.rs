use std::sync::Arc;

use crate::api::ApiClient;

/// Dependencies the view tree needs, provided by the composition root
/// (`crates/app`).
#[derive(Clone)]
pub struct AppContext {
    api: Arc<ApiClient>,
}

impl AppContext {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api: Arc::new(api) }
    }

    #[must_use]
    pub fn api(&self) -> Arc<ApiClient> {
        Arc::clone(&self.api)
    }
}
