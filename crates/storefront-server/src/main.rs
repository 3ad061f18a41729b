//! Storefront server binary

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_payments::{PaymentGateway, StripeGateway};
use storefront_server::{router, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().inspect_err(|e| {
        tracing::error!("{e}");
        tracing::error!("  Set STRIPE_SECRET_KEY and STRIPE_PUBLISHABLE_KEY in .env");
    })?;
    tracing::debug!(?config, "Loaded configuration");

    // Payments client, created once and shared through state
    let gateway: Arc<dyn PaymentGateway> = Arc::new(StripeGateway::new(&config.stripe_secret_key));
    tracing::info!("✓ {} gateway configured", gateway.name());

    let state = AppState::new(gateway, config.stripe_publishable_key.as_str())
        .with_catalog_base_url(config.catalog_base_url.as_str());
    let app = router(state, &config.static_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🛒 storefront running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /                          - Storefront");
    tracing::info!("  GET  /checkout-elements         - Embedded checkout");
    tracing::info!("  GET  /health                    - Health check");
    tracing::info!("  GET  /api/products              - List products");
    tracing::info!("  POST /api/create-payment-intent - Create payment intent");
    tracing::info!("  POST /api/checkout              - Create hosted checkout session");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
