use std::sync::Arc;

use pressroom_dal::Pool;

use crate::authors_client::AuthorsClient;

#[derive(Clone)]
pub struct AppState {
    state: Arc<AppStateInner>,
}

impl AppState {
    pub fn new(app_config: AppConfig, pool: Pool) -> Self {
        AppState {
            state: Arc::new(AppStateInner {
                app_config,
                pool,
                authors_client: None,
            }),
        }
    }

    /// State for the publications service, which additionally talks to the
    /// authors service.
    pub fn with_authors_client(
        app_config: AppConfig,
        pool: Pool,
        authors_client: AuthorsClient,
    ) -> Self {
        AppState {
            state: Arc::new(AppStateInner {
                app_config,
                pool,
                authors_client: Some(authors_client),
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.state.app_config
    }

    pub fn pool(&self) -> &Pool {
        &self.state.pool
    }

    pub fn authors_client(&self) -> Option<&AuthorsClient> {
        self.state.authors_client.as_ref()
    }
}

// Required by axum-valid's `Garde` extractor: the garde validation context
// (`()` for these payloads) must be obtainable from the router state.
impl axum::extract::FromRef<AppState> for () {
    fn from_ref(_state: &AppState) -> Self {}
}

struct AppStateInner {
    pool: Pool,
    app_config: AppConfig,
    authors_client: Option<AuthorsClient>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}
