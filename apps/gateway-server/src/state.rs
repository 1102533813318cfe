//! Application state - gateway wiring shared across all requests.

use std::sync::Arc;

use vantage_core::domain::Role;
use vantage_core::gateway::{GatewayDecisionEngine, IdentityResolver};
use vantage_core::ports::{ProfileStore, RateLimiter, SessionProvider};
use vantage_infra::{
    DatabaseConnections, FixedWindowLimiter, InMemoryProfileStore, JwtSessionProvider,
    PostgresProfileStore,
};

use crate::config::{self, AppConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<GatewayDecisionEngine>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let sessions: Arc<dyn SessionProvider> = Arc::new(JwtSessionProvider::from_env());

        let profiles: Arc<dyn ProfileStore> = match &config.database {
            Some(db_config) => match DatabaseConnections::init(db_config).await {
                Ok(connections) => Arc::new(PostgresProfileStore::new(connections.main)),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory profiles.",
                        e
                    );
                    Arc::new(seeded_profiles().await)
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Using in-memory profiles.");
                Arc::new(seeded_profiles().await)
            }
        };

        let limiter: Arc<dyn RateLimiter> = Arc::new(FixedWindowLimiter::new());
        let resolver = IdentityResolver::new(sessions, profiles);
        let engine = Arc::new(GatewayDecisionEngine::new(
            resolver,
            config::route_table(),
            limiter,
        ));

        tracing::info!("Application state initialized");

        Self { engine }
    }
}

/// Seed a couple of well-known profiles so the db-less mode is usable.
async fn seeded_profiles() -> InMemoryProfileStore {
    let store = InMemoryProfileStore::new();
    store
        .insert("admin-1", "admin@example.com", Role::Admin)
        .await;
    store
        .insert("expert-1", "expert@example.com", Role::Expert)
        .await;
    store
}
