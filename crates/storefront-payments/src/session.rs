//! Checkout Session Initiator
//!
//! Hosted checkout: creates a one-off payment session for one unit of a
//! price and hands back its id for the redirect.

use storefront_core::{CheckoutRequest, SessionId};

use crate::error::{PaymentError, Result};
use crate::gateway::{CustomerParams, PaymentGateway, SessionParams};

/// Return markers appended to the storefront root
pub const SUCCESS_QUERY: &str = "?success=true";
pub const CANCELED_QUERY: &str = "?canceled=true";

/// Create a hosted checkout session.
///
/// When the buyer supplied an email or address a customer record is created
/// first so checkout opens pre-filled.
pub async fn create_session(
    gateway: &dyn PaymentGateway,
    request: &CheckoutRequest,
    origin: &str,
) -> Result<SessionId> {
    create(gateway, request, origin)
        .await
        .inspect_err(|e| e.report("Error creating checkout session"))
}

async fn create(
    gateway: &dyn PaymentGateway,
    request: &CheckoutRequest,
    origin: &str,
) -> Result<SessionId> {
    let price_id = request.price_id().ok_or(PaymentError::MissingPriceId)?;

    let email = request.email().map(str::to_string);
    let address = request.address();
    let customer_id = if email.is_some() || address.is_some() {
        Some(gateway.create_customer(CustomerParams { email, address }).await?)
    } else {
        None
    };

    let origin = origin.trim_end_matches('/');
    let params = SessionParams {
        price_id: price_id.to_string(),
        quantity: 1,
        success_url: format!("{origin}/{SUCCESS_QUERY}"),
        cancel_url: format!("{origin}/{CANCELED_QUERY}"),
        automatic_tax: true,
        billing_address_required: true,
        customer_id,
    };

    let session = gateway.create_checkout_session(params).await?;
    tracing::info!(price_id = %price_id, "Created checkout session");

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::InMemoryGateway;
    use storefront_core::Address;

    #[tokio::test]
    async fn test_session_for_price() {
        let gateway = InMemoryGateway::new();
        let request = CheckoutRequest::for_price("price_valid_1000usd");

        let session = create_session(&gateway, &request, "https://shop.example")
            .await
            .unwrap();

        assert!(session.expose().starts_with("cs_"));
        let journal = gateway.journal().await;
        assert!(journal.customers.is_empty());
        let params = &journal.sessions[0];
        assert_eq!(params.price_id, "price_valid_1000usd");
        assert_eq!(params.quantity, 1);
        assert_eq!(params.success_url, "https://shop.example/?success=true");
        assert_eq!(params.cancel_url, "https://shop.example/?canceled=true");
        assert!(params.automatic_tax);
        assert!(params.billing_address_required);
        assert_eq!(params.customer_id, None);
    }

    #[tokio::test]
    async fn test_buyer_hints_create_customer_with_iso_country() {
        let gateway = InMemoryGateway::new();
        let request = CheckoutRequest::for_price("price_gbp_2500")
            .with_email(Some("buyer@example.com".into()))
            .with_address(Some(Address::new(Some("UK".into()), Some("SW1A 1AA".into()))));

        create_session(&gateway, &request, "https://shop.example/")
            .await
            .unwrap();

        let journal = gateway.journal().await;
        let customer = &journal.customers[0];
        assert_eq!(customer.email.as_deref(), Some("buyer@example.com"));
        let address = customer.address.as_ref().unwrap();
        assert_eq!(address.country.as_deref(), Some("GB"));
        assert_eq!(address.postal_code.as_deref(), Some("SW1A 1AA"));
        assert!(journal.sessions[0].customer_id.is_some());
        assert_eq!(
            journal.sessions[0].success_url,
            "https://shop.example/?success=true"
        );
    }

    #[tokio::test]
    async fn test_missing_price_id() {
        let gateway = InMemoryGateway::new();

        let err = create_session(&gateway, &CheckoutRequest::default(), "https://shop.example")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
        assert!(gateway.journal().await.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_platform_failure_is_generic() {
        let gateway = InMemoryGateway::unavailable();
        let request = CheckoutRequest::for_price("price_valid_1000usd")
            .with_email(Some("buyer@example.com".into()));

        let err = create_session(&gateway, &request, "https://shop.example")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 500);
        assert_eq!(err.user_message(), "Failed to create checkout session");
    }
}
