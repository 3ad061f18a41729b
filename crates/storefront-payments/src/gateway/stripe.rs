//! Stripe Integration
//!
//! [`PaymentGateway`] on top of `async-stripe`.

use async_trait::async_trait;
use stripe::{
    Address, CheckoutSession, CheckoutSessionBillingAddressCollection, CheckoutSessionMode, Client,
    CreateCheckoutSession, CreateCheckoutSessionAutomaticTax, CreateCheckoutSessionCustomerUpdate,
    CreateCheckoutSessionCustomerUpdateAddress, CreateCheckoutSessionCustomerUpdateName,
    CreateCheckoutSessionLineItems, CreateCustomer, CreatePaymentIntent, Currency, Customer,
    CustomerId, Expandable, ListPrices, PaymentIntent, Price, PriceId,
    Product, StripeError,
};
use storefront_core::{ClientSecret, SessionId};

use super::{
    CustomerParams, IntentParams, PaymentGateway, PriceRecord, ProductRecord, ProductRef,
    SessionParams,
};
use crate::error::{Operation, PaymentError, Result};

/// Stripe client wrapper
pub struct StripeGateway {
    client: Client,
}

impl StripeGateway {
    /// Create a new Stripe gateway from the secret API key
    pub fn new(secret_key: &str) -> Self {
        Self {
            client: Client::new(secret_key),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn list_active_prices(&self, limit: u64) -> Result<Vec<PriceRecord>> {
        let mut params = ListPrices::new();
        params.active = Some(true);
        params.expand = &["data.product"];
        params.limit = Some(limit);

        let prices = Price::list(&self.client, &params)
            .await
            .map_err(|e| map_stripe_error(e, Operation::ListPrices))?;

        Ok(prices.data.into_iter().map(price_record).collect())
    }

    async fn retrieve_price(&self, price_id: &str) -> Result<PriceRecord> {
        let id = price_id
            .parse::<PriceId>()
            .map_err(|e| PaymentError::InvalidPrice(format!("{price_id}: {e}")))?;

        let price = Price::retrieve(&self.client, &id, &[])
            .await
            .map_err(|e| match e {
                StripeError::Stripe(ref request) if request.http_status == 404 => {
                    PaymentError::InvalidPrice(format!("No such price: {price_id}"))
                }
                other => map_stripe_error(other, Operation::RetrievePrice),
            })?;

        Ok(price_record(price))
    }

    async fn create_payment_intent(&self, params: IntentParams) -> Result<ClientSecret> {
        let currency = parse_currency(&params.currency)?;

        let mut create = CreatePaymentIntent::new(params.amount, currency);
        create.payment_method_types = Some(params.payment_method_types.clone());
        create.receipt_email = params.receipt_email.as_deref();
        create.metadata = Some(params.metadata.clone());

        let intent = PaymentIntent::create(&self.client, create)
            .await
            .map_err(|e| map_stripe_error(e, Operation::CreatePaymentIntent))?;

        intent.client_secret.map(ClientSecret::new).ok_or_else(|| {
            PaymentError::upstream(Operation::CreatePaymentIntent, "No client secret returned")
        })
    }

    async fn create_customer(&self, params: CustomerParams) -> Result<String> {
        let mut create = CreateCustomer::new();
        create.email = params.email.as_deref();
        create.address = params.address.map(customer_address);

        let customer = Customer::create(&self.client, create)
            .await
            .map_err(|e| map_stripe_error(e, Operation::CreateCustomer))?;

        Ok(customer.id.to_string())
    }

    async fn create_checkout_session(&self, params: SessionParams) -> Result<SessionId> {
        let mut create = CreateCheckoutSession::new();
        create.mode = Some(CheckoutSessionMode::Payment);
        create.success_url = Some(&params.success_url);
        create.cancel_url = Some(&params.cancel_url);
        create.line_items = Some(vec![CreateCheckoutSessionLineItems {
            price: Some(params.price_id.clone()),
            quantity: Some(params.quantity),
            ..Default::default()
        }]);

        if params.automatic_tax {
            create.automatic_tax = Some(CreateCheckoutSessionAutomaticTax {
                enabled: true,
                ..Default::default()
            });
        }
        if params.billing_address_required {
            create.billing_address_collection =
                Some(CheckoutSessionBillingAddressCollection::Required);
        }

        if let Some(ref customer_id) = params.customer_id {
            let id = customer_id.parse::<CustomerId>().map_err(|e| {
                PaymentError::upstream(
                    Operation::CreateCheckoutSession,
                    format!("Failed to parse customer id {customer_id}: {e}"),
                )
            })?;
            create.customer = Some(id);
            create.customer_update = Some(CreateCheckoutSessionCustomerUpdate {
                address: Some(CreateCheckoutSessionCustomerUpdateAddress::Auto),
                name: Some(CreateCheckoutSessionCustomerUpdateName::Auto),
                ..Default::default()
            });
        }

        let session = CheckoutSession::create(&self.client, create)
            .await
            .map_err(|e| map_stripe_error(e, Operation::CreateCheckoutSession))?;

        Ok(SessionId::new(session.id.to_string()))
    }

    fn name(&self) -> &str {
        "Stripe"
    }
}

fn price_record(price: Price) -> PriceRecord {
    let product = match price.product {
        Some(Expandable::Object(product)) => ProductRef::Resolved(product_record(*product)),
        Some(Expandable::Id(id)) => ProductRef::Unresolved(id.to_string()),
        None => ProductRef::Missing,
    };

    PriceRecord {
        id: price.id.to_string(),
        unit_amount: price.unit_amount,
        currency: price.currency.map(|c| c.to_string()),
        product,
    }
}

fn product_record(product: Product) -> ProductRecord {
    ProductRecord {
        id: product.id.to_string(),
        name: product.name.unwrap_or_default(),
        description: product.description,
        images: product.images.unwrap_or_default(),
    }
}

/// Currency codes come back from the platform lowercase, which is also how
/// `Currency` deserializes.
fn parse_currency(code: &str) -> Result<Currency> {
    serde_json::from_value(serde_json::Value::String(code.to_lowercase()))
        .map_err(|_| PaymentError::InvalidPrice(format!("Unsupported currency: {code}")))
}

fn customer_address(address: storefront_core::Address) -> Address {
    Address {
        country: address.country,
        postal_code: address.postal_code,
        ..Default::default()
    }
}

fn map_stripe_error(error: StripeError, operation: Operation) -> PaymentError {
    match error {
        StripeError::Stripe(request) => PaymentError::Upstream {
            operation,
            message: request
                .message
                .unwrap_or_else(|| "Unknown error".to_string()),
            status: Some(request.http_status),
        },
        StripeError::Timeout => PaymentError::Upstream {
            operation,
            message: "Request timed out".to_string(),
            status: Some(408),
        },
        other => PaymentError::upstream(operation, other.to_string()),
    }
}
