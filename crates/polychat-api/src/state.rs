//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository traits, but AppState pins them to the
//! concrete infra implementations.

use std::path::Path;
use std::sync::Arc;

use polychat_core::exchange::ExchangeService;
use polychat_core::responder::ResponderRegistry;
use polychat_infra::config::{load_global_config, resolve_data_dir};
use polychat_infra::payments::CheckoutClient;
use polychat_infra::sqlite::message::SqliteMessageRepository;
use polychat_infra::sqlite::pool::DatabasePool;
use polychat_infra::sqlite::subscription::SqliteSubscriptionRepository;
use polychat_types::config::GlobalConfig;

/// Concrete type alias for the service generic pinned to the infra implementation.
pub type ConcreteExchangeService = ExchangeService<SqliteSubscriptionRepository>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub exchange_service: Arc<ConcreteExchangeService>,
    pub message_repo: Arc<SqliteMessageRepository>,
    pub checkout: Option<Arc<CheckoutClient>>,
    pub config: GlobalConfig,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: resolve the data directory, load
    /// config, connect to the database, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;
        Self::init_with(config, &data_dir).await
    }

    /// Wire services against an explicit config and data directory.
    pub async fn init_with(config: GlobalConfig, data_dir: &Path) -> anyhow::Result<Self> {
        let db_url = config.database_url.clone().unwrap_or_else(|| {
            format!(
                "sqlite://{}?mode=rwc",
                data_dir.join("polychat.db").display()
            )
        });
        let db_pool = DatabasePool::new(&db_url).await?;

        let subscription_repo = SqliteSubscriptionRepository::new(db_pool.clone());
        let exchange_service =
            ExchangeService::new(subscription_repo, ResponderRegistry::default());

        let message_repo = SqliteMessageRepository::new(db_pool.clone());

        let checkout = config
            .checkout_endpoint
            .as_ref()
            .map(|endpoint| Arc::new(CheckoutClient::new(endpoint.clone())));

        Ok(Self {
            exchange_service: Arc::new(exchange_service),
            message_repo: Arc::new(message_repo),
            checkout,
            config,
            db_pool,
        })
    }
}
