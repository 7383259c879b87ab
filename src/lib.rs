//! folio: portfolio resources over a relational store, with the public view and admin screens.

pub mod client;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod view;

pub use client::{ClientError, HttpApi};
pub use config::{bundled_config, load_from_path, resolve, FullConfig, ResolvedModel, Settings, TableSpec};
pub use error::{AppError, ConfigError, StoreError};
pub use migration::apply_migrations;
pub use routes::{common_routes, resource_routes};
pub use service::CrudService;
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Store};

use axum::Router;
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// The full router: operational routes at the root, resources under `/api`.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", resource_routes(state))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}

/// Resolve the manifest and open the store described by `settings`.
/// Without a store URL the data lives in memory for the life of the process.
pub async fn build_state(settings: &Settings) -> Result<AppState, AppError> {
    let config = match &settings.manifest_path {
        Some(path) => load_from_path(path).await?,
        None => bundled_config()?,
    };
    let model = resolve(&config)?;

    let store: Arc<dyn Store> = match &settings.store_url {
        Some(url) => {
            let store = PgStore::connect(url, settings.store_service_key.as_deref(), settings.store_max_connections).await?;
            if settings.store_auto_migrate {
                apply_migrations(store.pool(), &model).await?;
            }
            tracing::info!(tables = model.tables.len(), "connected to store");
            Arc::new(store)
        }
        None => {
            tracing::warn!("STORE_URL not set; using in-memory store, data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    if settings.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN not set; admin operations are open to every caller");
    }
    Ok(AppState::new(store, model).with_admin_token(settings.admin_token.clone()))
}
