//! # Revenue Share Backend
//!
//! Computes the monthly revenue-sharing distribution of a department's
//! employees from attendance and shift records, and persists the result as a
//! record with one line item per employee.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (distribution builder, allocation rules)
//!     ↓
//! Storage Layer (SQLite repositories behind storage traits)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{AppConfig, DistributionConfig};
use crate::domain::DistributionService;
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub distribution_service: DistributionService<DbConnection>,
}

impl AppState {
    pub fn new(db: &DbConnection, config: DistributionConfig) -> Self {
        Self {
            distribution_service: DistributionService::with_config(db, config),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url).await?;

    info!("Setting up application state");
    Ok(AppState::new(&db_conn, config.distribution.clone()))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("http://localhost:8080"))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(io::rest::health_apis::health))
        .nest("/distributions", io::rest::distribution_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
