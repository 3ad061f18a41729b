//! In-Memory Gateway
//!
//! For testing and demo purposes. Serves a fixed catalog and records every
//! write so callers can inspect exactly what would have reached the platform.

use async_trait::async_trait;
use storefront_core::{ClientSecret, SessionId};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{
    CustomerParams, IntentParams, PaymentGateway, PriceRecord, ProductRecord, ProductRef,
    SessionParams,
};
use crate::error::{Operation, PaymentError, Result};

/// Writes seen by an [`InMemoryGateway`]
#[derive(Clone, Debug, Default)]
pub struct Journal {
    pub intents: Vec<IntentParams>,
    pub customers: Vec<CustomerParams>,
    pub sessions: Vec<SessionParams>,
}

/// Gateway backed by a static price list
pub struct InMemoryGateway {
    prices: Vec<PriceRecord>,
    /// Every call fails as if the platform were down
    unavailable: bool,
    journal: Mutex<Journal>,
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGateway {
    /// Gateway with the seeded demo catalog
    pub fn new() -> Self {
        Self::with_prices(Self::seeded_prices())
    }

    pub fn with_prices(prices: Vec<PriceRecord>) -> Self {
        Self {
            prices,
            unavailable: false,
            journal: Mutex::new(Journal::default()),
        }
    }

    /// Gateway whose every call fails
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new()
        }
    }

    /// Snapshot of recorded writes
    pub async fn journal(&self) -> Journal {
        self.journal.lock().await.clone()
    }

    /// Demo catalog.
    ///
    /// Two sellable prices, plus entries the storefront must never list or
    /// charge: a zero amount, a price without a unit amount, and a price
    /// whose product was not expanded.
    pub fn seeded_prices() -> Vec<PriceRecord> {
        vec![
            price(
                "price_valid_1000usd",
                Some(1000),
                "usd",
                resolved(
                    "prod_tee",
                    "Zarpado Tee",
                    Some("Heavyweight cotton tee with the Zarpado mark."),
                    &["https://files.stripe.com/links/zarpado-tee.png"],
                ),
            ),
            price(
                "price_gbp_2500",
                Some(2500),
                "gbp",
                resolved("prod_cap", "Zarpado Cap", None, &[]),
            ),
            price(
                "price_zero_amount",
                Some(0),
                "usd",
                resolved("prod_sticker", "Sticker", Some("Free with any order."), &[]),
            ),
            price(
                "price_metered",
                None,
                "usd",
                resolved("prod_meter", "Metered Plan", None, &[]),
            ),
            price(
                "price_unexpanded",
                Some(500),
                "usd",
                ProductRef::Unresolved("prod_ghost".into()),
            ),
        ]
    }

    fn check_available(&self, operation: Operation) -> Result<()> {
        if self.unavailable {
            return Err(PaymentError::Upstream {
                operation,
                message: "Gateway unavailable".into(),
                status: Some(503),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for InMemoryGateway {
    async fn list_active_prices(&self, limit: u64) -> Result<Vec<PriceRecord>> {
        self.check_available(Operation::ListPrices)?;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self.prices.iter().take(limit).cloned().collect())
    }

    async fn retrieve_price(&self, price_id: &str) -> Result<PriceRecord> {
        self.check_available(Operation::RetrievePrice)?;
        self.prices
            .iter()
            .find(|p| p.id == price_id)
            .cloned()
            .ok_or_else(|| PaymentError::InvalidPrice(format!("No such price: {price_id}")))
    }

    async fn create_payment_intent(&self, params: IntentParams) -> Result<ClientSecret> {
        self.check_available(Operation::CreatePaymentIntent)?;
        self.journal.lock().await.intents.push(params);
        Ok(ClientSecret::new(format!(
            "pi_{}_secret_{}",
            Uuid::new_v4().simple(),
            Uuid::new_v4().simple()
        )))
    }

    async fn create_customer(&self, params: CustomerParams) -> Result<String> {
        self.check_available(Operation::CreateCustomer)?;
        self.journal.lock().await.customers.push(params);
        Ok(format!("cus_{}", Uuid::new_v4().simple()))
    }

    async fn create_checkout_session(&self, params: SessionParams) -> Result<SessionId> {
        self.check_available(Operation::CreateCheckoutSession)?;
        if !self.prices.iter().any(|p| p.id == params.price_id) {
            return Err(PaymentError::InvalidPrice(format!(
                "No such price: {}",
                params.price_id
            )));
        }
        self.journal.lock().await.sessions.push(params);
        Ok(SessionId::new(format!("cs_test_{}", Uuid::new_v4().simple())))
    }

    fn name(&self) -> &str {
        "InMemory"
    }
}

fn price(id: &str, unit_amount: Option<i64>, currency: &str, product: ProductRef) -> PriceRecord {
    PriceRecord {
        id: id.into(),
        unit_amount,
        currency: Some(currency.into()),
        product,
    }
}

fn resolved(id: &str, name: &str, description: Option<&str>, images: &[&str]) -> ProductRef {
    ProductRef::Resolved(ProductRecord {
        id: id.into(),
        name: name.into(),
        description: description.map(str::to_string),
        images: images.iter().map(|s| (*s).to_string()).collect(),
    })
}
