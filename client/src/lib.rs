//! Stock Admin - client library
//!
//! Typed access to the inventory/point-of-sale backend and the page logic of
//! the administration console: searchable paginated lists, purchase and sale
//! baskets, the dashboard and the session-gated navigation.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod controllers;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod http;
pub mod session;
pub mod telemetry;

pub use api::{ApiClient, BasketResource, EditableResource, Resource};
pub use config::Config;
pub use controllers::{
    BasketController, DashboardController, ListController, Lookup, LookupSet, ReloadOutcome,
};
pub use error::{ClientError, ClientResult};
pub use http::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport};
pub use session::{route_guard, RouteDecision, SessionContext, SessionState};

use shared::{Product, Purchase, Sale, Searchable};

/// Everything a page needs, shared across the console
#[derive(Clone)]
pub struct AdminContext {
    pub config: Arc<Config>,
    pub session: SessionContext,
    pub api: ApiClient,
}

impl AdminContext {
    /// Load `.env` and configuration, then build the reqwest-backed context
    pub fn from_env() -> ClientResult<Self> {
        dotenvy::dotenv().ok();
        let config = Config::load()?;
        tracing::info!("Environment: {}", config.environment);
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> ClientResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config.api)?);
        tracing::info!("Backend at {}", transport.base_url());
        Ok(Self::with_transport(config, transport))
    }

    /// Build the context over any transport
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        let session = SessionContext::new(config.session.clone());
        let api = ApiClient::new(transport, session.clone())
            .with_bearer_token(config.api.send_bearer_token);
        Self {
            config: Arc::new(config),
            session,
            api,
        }
    }

    /// Controller of a list page with the configured page size
    pub fn list<R: Resource + Searchable>(&self) -> ListController<R> {
        ListController::new(self.api.clone(), self.config.list.page_size)
    }

    /// Products at or under their minimum stock
    pub fn low_stock_list(&self) -> ListController<Product> {
        ListController::with_path(
            self.api.clone(),
            endpoints::LOW_STOCK_ALERTS,
            self.config.list.page_size,
        )
    }

    pub fn purchases(&self) -> BasketController<Purchase> {
        BasketController::new(self.list())
    }

    pub fn sales(&self) -> BasketController<Sale> {
        BasketController::new(self.list())
    }

    pub fn dashboard(&self) -> DashboardController {
        DashboardController::new(self.api.clone())
    }

    pub async fn lookups(&self, wanted: &[Lookup]) -> LookupSet {
        LookupSet::load(&self.api, wanted).await
    }
}
