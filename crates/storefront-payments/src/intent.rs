//! Intent Initiator
//!
//! Creates a card payment intent for exactly the amount and currency of a
//! price, as the platform reports it right now.

use std::collections::HashMap;

use storefront_core::{CheckoutRequest, ClientSecret};

use crate::error::{PaymentError, Result};
use crate::gateway::{IntentParams, PaymentGateway};

/// Metadata key linking an intent back to the price it charges
pub const PRICE_ID_METADATA_KEY: &str = "price_id";

/// Create a payment intent for the requested price.
///
/// The request's address is accepted but not forwarded.
pub async fn create_intent(
    gateway: &dyn PaymentGateway,
    request: &CheckoutRequest,
) -> Result<ClientSecret> {
    create(gateway, request)
        .await
        .inspect_err(|e| e.report("Error creating payment intent"))
}

async fn create(gateway: &dyn PaymentGateway, request: &CheckoutRequest) -> Result<ClientSecret> {
    let price_id = request.price_id().ok_or(PaymentError::MissingPriceId)?;

    let price = gateway.retrieve_price(price_id).await?;
    let (Some(amount), Some(currency)) = (price.unit_amount, price.currency.filter(|c| !c.is_empty()))
    else {
        return Err(PaymentError::InvalidPrice(format!(
            "{price_id} has no unit amount or currency"
        )));
    };
    if amount <= 0 {
        return Err(PaymentError::NonPositiveAmount);
    }

    let params = IntentParams {
        amount,
        currency: currency.clone(),
        payment_method_types: vec!["card".to_string()],
        receipt_email: request.email().map(str::to_string),
        metadata: HashMap::from([(PRICE_ID_METADATA_KEY.to_string(), price_id.to_string())]),
    };

    let secret = gateway.create_payment_intent(params).await?;

    tracing::info!(
        price_id = %price_id,
        amount,
        currency = %currency,
        "Created payment intent"
    );

    Ok(secret)
}
