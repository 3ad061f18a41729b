//! Application State

use std::sync::Arc;

use storefront_payments::PaymentGateway;

use crate::config::{local_base_url, DEFAULT_BIND_ADDR};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payments platform (Stripe, or in-memory for tests)
    pub gateway: Arc<dyn PaymentGateway>,

    /// Client the storefront page uses to call the catalog endpoint
    pub http: reqwest::Client,

    /// Publishable key injected into pages for Stripe.js
    pub publishable_key: Arc<str>,

    /// Base URL of this server for the catalog read; never taken from
    /// request headers
    pub catalog_base_url: Arc<str>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn PaymentGateway>, publishable_key: impl Into<Arc<str>>) -> Self {
        Self {
            gateway,
            http: reqwest::Client::new(),
            publishable_key: publishable_key.into(),
            catalog_base_url: local_base_url(DEFAULT_BIND_ADDR).into(),
        }
    }

    #[must_use]
    pub fn with_catalog_base_url(mut self, url: impl Into<Arc<str>>) -> Self {
        self.catalog_base_url = url.into();
        self
    }
}
