//! Payments Platform Gateway
//!
//! The storefront never talks to the platform SDK directly; every call goes
//! through [`PaymentGateway`] so handlers can be exercised against
//! [`InMemoryGateway`].

mod memory;
mod stripe;

pub use memory::{InMemoryGateway, Journal};
pub use self::stripe::StripeGateway;

use std::collections::HashMap;

use async_trait::async_trait;
use storefront_core::{Address, ClientSecret, SessionId};

use crate::error::Result;

/// Gateway trait (Strategy pattern)
///
/// Implement this for each payments platform.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// List active prices with their products expanded
    async fn list_active_prices(&self, limit: u64) -> Result<Vec<PriceRecord>>;

    /// Fetch the current record for one price
    async fn retrieve_price(&self, price_id: &str) -> Result<PriceRecord>;

    /// Create a payment intent and return only its client secret
    async fn create_payment_intent(&self, params: IntentParams) -> Result<ClientSecret>;

    /// Create a customer record, returning its id
    async fn create_customer(&self, params: CustomerParams) -> Result<String>;

    /// Create a hosted checkout session
    async fn create_checkout_session(&self, params: SessionParams) -> Result<SessionId>;

    /// Gateway name
    fn name(&self) -> &str;
}

// ============================================================================
// Records
// ============================================================================

/// A price as the platform reports it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceRecord {
    pub id: String,
    /// Smallest currency unit; absent for tiered or metered prices
    pub unit_amount: Option<i64>,
    /// Lowercase ISO 4217 code
    pub currency: Option<String>,
    pub product: ProductRef,
}

/// The product a price belongs to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductRef {
    Missing,
    /// Only the id came back (not expanded)
    Unresolved(String),
    Resolved(ProductRecord),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub images: Vec<String>,
}

// ============================================================================
// Parameters
// ============================================================================

/// Payment intent creation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntentParams {
    pub amount: i64,
    pub currency: String,
    pub payment_method_types: Vec<String>,
    pub receipt_email: Option<String>,
    pub metadata: HashMap<String, String>,
}

/// Customer creation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerParams {
    pub email: Option<String>,
    pub address: Option<Address>,
}

/// One-off hosted checkout session creation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionParams {
    pub price_id: String,
    pub quantity: u64,
    pub success_url: String,
    pub cancel_url: String,
    pub automatic_tax: bool,
    pub billing_address_required: bool,
    /// Bind the session to this customer and let checkout update its
    /// address and name
    pub customer_id: Option<String>,
}
