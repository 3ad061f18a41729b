//! Storefront HTTP Server
//!
//! Axum-based server providing the JSON API, the server-rendered storefront
//! and the shell page the WASM checkout mounts into.

pub mod config;
pub mod handlers;
pub mod pages;
pub mod state;

use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use storefront_core::CHECKOUT_ROUTE;

pub use config::{AppConfig, ConfigError};
pub use state::AppState;

/// Build the application router
pub fn router(state: AppState, static_dir: &Path) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Pages
        .route("/", get(pages::storefront))
        .route(CHECKOUT_ROUTE, get(pages::checkout))

        // Health
        .route("/health", get(handlers::health_check))

        // API
        .route("/api/products", get(handlers::list_products))
        .route("/api/create-payment-intent", post(handlers::create_payment_intent))
        .route("/api/checkout", post(handlers::create_checkout))

        // WASM bundle and assets
        .nest_service("/pkg", ServeDir::new(static_dir.join("pkg")))
        .nest_service("/static", ServeDir::new(static_dir))

        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
