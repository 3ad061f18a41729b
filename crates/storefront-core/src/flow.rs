//! Embedded Checkout Flow
//!
//! State machine and async drivers for the in-page checkout. The drivers
//! only talk to two seams: [`StorefrontApi`] (our own JSON endpoints) and
//! [`PaymentConfirmer`] (the payment widget). The WASM client implements
//! both; tests use in-memory doubles.

use async_trait::async_trait;

use crate::billing::BillingDetails;
use crate::error::{FlowError, Result};
use crate::model::{Address, CheckoutRequest, ClientSecret, IntentStatus, ProductListing, CHECKOUT_ROUTE};

/// Query marker set on the return URL after an out-of-band confirmation
pub const SUCCESS_MARKER: &str = "success";

/// Query parameter the platform appends to the return URL
pub const RETURNED_SECRET_PARAM: &str = "payment_intent_client_secret";

const CONFIRM_FALLBACK_MESSAGE: &str = "Payment failed";
const UNEXPECTED_MESSAGE: &str = "Something went wrong";

// ============================================================================
// Seams
// ============================================================================

/// The storefront's own JSON API as seen from the browser
#[async_trait(?Send)]
pub trait StorefrontApi {
    /// `GET /api/products`
    async fn list_products(&self) -> Result<Vec<ProductListing>>;

    /// `POST /api/create-payment-intent`
    async fn create_payment_intent(&self, request: &CheckoutRequest) -> Result<ClientSecret>;
}

/// Outcome of a confirmation call that reached the platform
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// No error reported, the payment went through
    Completed,
    /// Decline or validation message for the buyer
    Declined(Option<String>),
}

/// The embedded payment widget
#[async_trait(?Send)]
pub trait PaymentConfirmer {
    /// Confirm the mounted payment form, redirecting only when required
    async fn confirm_payment(
        &self,
        billing: &BillingDetails,
        receipt_email: Option<&str>,
        return_url: &str,
    ) -> Result<ConfirmOutcome>;

    /// Current status of the intent behind `secret`
    async fn retrieve_status(&self, secret: &ClientSecret) -> Result<IntentStatus>;
}

// ============================================================================
// Parameters
// ============================================================================

/// Everything the checkout route reads from its query string
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckoutParams {
    pub price_id: Option<String>,
    pub email: Option<String>,
    pub address: Address,
    /// `?success=true` was present
    pub success_marker: bool,
    /// Secret of the intent confirmed before an out-of-band redirect
    pub returned_secret: Option<ClientSecret>,
}

impl CheckoutParams {
    /// Build from a query lookup (`priceId`, `email`, `country`, `postal_code`,
    /// `success`, `payment_intent_client_secret`)
    pub fn from_query<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            price_id: non_blank("priceId"),
            email: non_blank("email"),
            address: Address::new(non_blank("country"), non_blank("postal_code")).normalized(),
            success_marker: non_blank(SUCCESS_MARKER).is_some_and(|v| v == "true"),
            returned_secret: non_blank(RETURNED_SECRET_PARAM).map(ClientSecret::new),
        }
    }

    /// Intent request for `price_id` carrying the buyer hints
    pub fn intent_request(&self, price_id: String) -> CheckoutRequest {
        CheckoutRequest::for_price(price_id)
            .with_email(self.email.clone())
            .with_address(self.address_hint())
    }

    /// Return URL handed to the platform for out-of-band confirmation.
    ///
    /// Names the same price and buyer hints as the current page so a buyer
    /// coming back from an unfinished challenge lands on the same checkout.
    pub fn return_url(&self, origin: &str) -> String {
        let request = CheckoutRequest {
            price_id: self.price_id.clone(),
            email: self.email.clone(),
            address: self.address_hint(),
        };
        let mut query = request.checkout_query();
        if !query.is_empty() {
            query.push('&');
        }

        format!(
            "{}{CHECKOUT_ROUTE}?{query}{SUCCESS_MARKER}=true",
            origin.trim_end_matches('/')
        )
    }

    fn address_hint(&self) -> Option<Address> {
        (!self.address.is_empty()).then(|| self.address.clone())
    }

    pub fn billing_details(&self) -> BillingDetails {
        BillingDetails::assemble(self.email.as_deref(), &self.address)
    }
}

// ============================================================================
// State Machine
// ============================================================================

/// Something that happened during the checkout
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowEvent {
    IntentReady(ClientSecret),
    IntentFailed(String),
    Submit,
    ConfirmFailed(String),
    Confirmed,
    /// A post-redirect status check reported a succeeded intent
    ReturnSucceeded,
}

/// Where the checkout page is
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CheckoutState {
    #[default]
    Initializing,
    LoadError(String),
    AwaitingPayment {
        client_secret: ClientSecret,
        error: Option<String>,
    },
    Submitting {
        client_secret: ClientSecret,
    },
    Succeeded,
}

impl CheckoutState {
    /// Apply an event. Events that make no sense in the current state leave
    /// it unchanged; `Succeeded` is terminal.
    #[must_use]
    pub fn apply(self, event: FlowEvent) -> Self {
        match (self, event) {
            (Self::Succeeded, _) | (_, FlowEvent::ReturnSucceeded) => Self::Succeeded,

            (Self::Initializing, FlowEvent::IntentReady(client_secret)) => Self::AwaitingPayment {
                client_secret,
                error: None,
            },
            (Self::Initializing, FlowEvent::IntentFailed(message)) => Self::LoadError(message),

            (Self::AwaitingPayment { client_secret, .. }, FlowEvent::Submit) => {
                Self::Submitting { client_secret }
            }

            (Self::Submitting { client_secret }, FlowEvent::ConfirmFailed(message)) => {
                Self::AwaitingPayment {
                    client_secret,
                    error: Some(message),
                }
            }
            (Self::Submitting { .. }, FlowEvent::Confirmed) => Self::Succeeded,

            (state, event) => {
                tracing::debug!(?state, ?event, "Ignoring checkout event");
                state
            }
        }
    }

    pub const fn client_secret(&self) -> Option<&ClientSecret> {
        match self {
            Self::AwaitingPayment { client_secret, .. } | Self::Submitting { client_secret } => {
                Some(client_secret)
            }
            _ => None,
        }
    }

    pub const fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    pub const fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Inline error to show next to the payment form
    pub fn form_error(&self) -> Option<&str> {
        match self {
            Self::AwaitingPayment { error, .. } => error.as_deref(),
            _ => None,
        }
    }
}

// ============================================================================
// Drivers
// ============================================================================

/// Bring a freshly loaded checkout page to its first settled state.
///
/// A buyer returning with the secret of an intent that already succeeded
/// goes straight to success and no new intent is created. Otherwise an
/// intent is prepared; when the page only carries the success marker the
/// new intent is checked as well.
pub async fn initialize<A, C>(api: &A, confirmer: &C, params: &mut CheckoutParams) -> FlowEvent
where
    A: StorefrontApi + ?Sized,
    C: PaymentConfirmer + ?Sized,
{
    if params.returned_secret.is_some() {
        if let Some(event) = reconcile_return(confirmer, params, None).await {
            return event;
        }
    }

    let event = prepare_intent(api, params).await;

    if let FlowEvent::IntentReady(ref secret) = event {
        if params.returned_secret.is_none() {
            if let Some(returned) = reconcile_return(confirmer, params, Some(secret)).await {
                return returned;
            }
        }
    }

    event
}

/// Obtain a client secret for the requested price.
///
/// Falls back to the first catalog listing when no price was requested and
/// records that choice in `params.price_id`.
pub async fn prepare_intent<A>(api: &A, params: &mut CheckoutParams) -> FlowEvent
where
    A: StorefrontApi + ?Sized,
{
    match request_intent(api, params).await {
        Ok(secret) => FlowEvent::IntentReady(secret),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to prepare payment");
            FlowEvent::IntentFailed(e.load_message())
        }
    }
}

async fn request_intent<A>(api: &A, params: &mut CheckoutParams) -> Result<ClientSecret>
where
    A: StorefrontApi + ?Sized,
{
    let price_id = match &params.price_id {
        Some(price_id) => price_id.clone(),
        None => {
            let first = api
                .list_products()
                .await?
                .into_iter()
                .next()
                .map(|listing| listing.price_id)
                .ok_or(FlowError::NoProducts)?;
            params.price_id = Some(first.clone());
            first
        }
    };

    api.create_payment_intent(&params.intent_request(price_id)).await
}

/// Confirm the payment form and report how it went
pub async fn submit_payment<C>(confirmer: &C, params: &CheckoutParams, return_url: &str) -> FlowEvent
where
    C: PaymentConfirmer + ?Sized,
{
    let billing = params.billing_details();

    match confirmer
        .confirm_payment(&billing, params.email.as_deref(), return_url)
        .await
    {
        Ok(ConfirmOutcome::Completed) => FlowEvent::Confirmed,
        Ok(ConfirmOutcome::Declined(message)) => FlowEvent::ConfirmFailed(
            message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| CONFIRM_FALLBACK_MESSAGE.into()),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Payment confirmation failed");
            FlowEvent::ConfirmFailed(UNEXPECTED_MESSAGE.into())
        }
    }
}

/// Check whether a buyer returning from an out-of-band confirmation has
/// already paid.
///
/// Only runs when the success marker is present. Prefers the secret the
/// platform put on the return URL over `known`.
pub async fn reconcile_return<C>(
    confirmer: &C,
    params: &CheckoutParams,
    known: Option<&ClientSecret>,
) -> Option<FlowEvent>
where
    C: PaymentConfirmer + ?Sized,
{
    if !params.success_marker {
        return None;
    }

    let secret = params.returned_secret.as_ref().or(known)?;

    match confirmer.retrieve_status(secret).await {
        Ok(status) if status.is_succeeded() => Some(FlowEvent::ReturnSucceeded),
        Ok(status) => {
            tracing::debug!(?status, "Returned intent has not succeeded");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to retrieve returned intent");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    struct FakeApi {
        products: Vec<ProductListing>,
        requests: RefCell<Vec<CheckoutRequest>>,
        reject_with: Option<FlowError>,
    }

    impl FakeApi {
        fn new(products: Vec<ProductListing>) -> Self {
            Self {
                products,
                requests: RefCell::new(Vec::new()),
                reject_with: None,
            }
        }
    }

    #[async_trait(?Send)]
    impl StorefrontApi for FakeApi {
        async fn list_products(&self) -> Result<Vec<ProductListing>> {
            Ok(self.products.clone())
        }

        async fn create_payment_intent(&self, request: &CheckoutRequest) -> Result<ClientSecret> {
            self.requests.borrow_mut().push(request.clone());
            match &self.reject_with {
                Some(e) => Err(e.clone()),
                None => Ok(ClientSecret::new(format!(
                    "pi_for_{}_secret_x",
                    request.price_id().unwrap_or_default()
                ))),
            }
        }
    }

    struct FakeWidget {
        outcome: Result<ConfirmOutcome>,
        statuses: HashMap<String, IntentStatus>,
        billing_seen: RefCell<Option<BillingDetails>>,
    }

    impl FakeWidget {
        fn confirming(outcome: Result<ConfirmOutcome>) -> Self {
            Self {
                outcome,
                statuses: HashMap::new(),
                billing_seen: RefCell::new(None),
            }
        }

        fn with_status(mut self, secret: &str, status: IntentStatus) -> Self {
            self.statuses.insert(secret.to_string(), status);
            self
        }
    }

    #[async_trait(?Send)]
    impl PaymentConfirmer for FakeWidget {
        async fn confirm_payment(
            &self,
            billing: &BillingDetails,
            _receipt_email: Option<&str>,
            _return_url: &str,
        ) -> Result<ConfirmOutcome> {
            *self.billing_seen.borrow_mut() = Some(billing.clone());
            self.outcome.clone()
        }

        async fn retrieve_status(&self, secret: &ClientSecret) -> Result<IntentStatus> {
            self.statuses
                .get(secret.expose())
                .copied()
                .ok_or_else(|| FlowError::Widget("no such intent".into()))
        }
    }

    fn listing(price_id: &str) -> ProductListing {
        ProductListing {
            id: format!("prod_{price_id}"),
            name: "Tee".into(),
            description: None,
            image: None,
            price_id: price_id.into(),
            currency: "usd".into(),
            unit_amount: Some(1000),
        }
    }

    fn query(pairs: &[(&str, &str)]) -> CheckoutParams {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        CheckoutParams::from_query(|key| map.get(key).cloned())
    }

    fn awaiting() -> CheckoutState {
        CheckoutState::Initializing.apply(FlowEvent::IntentReady(ClientSecret::new("pi_1_secret_a")))
    }

    #[test]
    fn test_params_from_query() {
        let params = query(&[
            ("priceId", "price_1"),
            ("email", " buyer@example.com "),
            ("country", "UK"),
            ("postal_code", "WS11 1AA"),
            ("success", "true"),
        ]);

        assert_eq!(params.price_id.as_deref(), Some("price_1"));
        assert_eq!(params.email.as_deref(), Some("buyer@example.com"));
        assert_eq!(params.address.country.as_deref(), Some("GB"));
        assert!(params.success_marker);
        assert!(params.returned_secret.is_none());
    }

    #[test]
    fn test_success_marker_must_be_true() {
        assert!(!query(&[("success", "false")]).success_marker);
        assert!(!query(&[]).success_marker);
    }

    #[test]
    fn test_happy_path_transitions() {
        let state = awaiting();
        assert_eq!(state.client_secret().map(ClientSecret::expose), Some("pi_1_secret_a"));

        let state = state.apply(FlowEvent::Submit);
        assert!(state.is_submitting());

        let state = state.apply(FlowEvent::Confirmed);
        assert!(state.is_succeeded());
    }

    #[test]
    fn test_decline_returns_to_form_with_error() {
        let state = awaiting()
            .apply(FlowEvent::Submit)
            .apply(FlowEvent::ConfirmFailed("Your card was declined.".into()));

        assert_eq!(state.form_error(), Some("Your card was declined."));
        assert!(state.client_secret().is_some());

        // The buyer can re-submit.
        assert!(state.apply(FlowEvent::Submit).is_submitting());
    }

    #[test]
    fn test_load_failure() {
        let state = CheckoutState::Initializing.apply(FlowEvent::IntentFailed("Invalid price".into()));
        assert_eq!(state, CheckoutState::LoadError("Invalid price".into()));
        assert_eq!(state.clone().apply(FlowEvent::Submit), state);
    }

    #[test]
    fn test_succeeded_is_terminal_and_idempotent() {
        let state = CheckoutState::Succeeded;
        assert!(state.clone().apply(FlowEvent::ConfirmFailed("late".into())).is_succeeded());
        assert!(state.clone().apply(FlowEvent::ReturnSucceeded).is_succeeded());
        assert!(state.apply(FlowEvent::IntentFailed("late".into())).is_succeeded());
    }

    #[test]
    fn test_succeeded_only_via_confirmation_or_return() {
        let events = [
            FlowEvent::IntentReady(ClientSecret::new("pi_2_secret_b")),
            FlowEvent::IntentFailed("x".into()),
            FlowEvent::Submit,
            FlowEvent::ConfirmFailed("x".into()),
        ];
        let starts = [
            CheckoutState::Initializing,
            CheckoutState::LoadError("x".into()),
            awaiting(),
            awaiting().apply(FlowEvent::Submit),
        ];

        for start in &starts {
            for event in &events {
                assert!(
                    !start.clone().apply(event.clone()).is_succeeded(),
                    "{start:?} + {event:?} must not succeed"
                );
            }
            assert!(start.clone().apply(FlowEvent::ReturnSucceeded).is_succeeded());
        }

        // Confirmed only counts while a confirmation is in flight.
        assert!(!awaiting().apply(FlowEvent::Confirmed).is_succeeded());
        assert!(!CheckoutState::Initializing.apply(FlowEvent::Confirmed).is_succeeded());
    }

    #[tokio::test]
    async fn test_prepare_intent_uses_requested_price() {
        let api = FakeApi::new(vec![listing("price_first")]);
        let mut params = query(&[("priceId", "price_wanted"), ("email", "a@b.co"), ("country", "UK")]);

        let event = prepare_intent(&api, &mut params).await;

        assert_eq!(
            event,
            FlowEvent::IntentReady(ClientSecret::new("pi_for_price_wanted_secret_x"))
        );
        let sent = api.requests.borrow();
        assert_eq!(sent[0].email(), Some("a@b.co"));
        assert_eq!(sent[0].address().unwrap().country.as_deref(), Some("GB"));
    }

    #[tokio::test]
    async fn test_prepare_intent_falls_back_to_first_listing() {
        let api = FakeApi::new(vec![listing("price_first"), listing("price_second")]);
        let mut params = CheckoutParams::default();

        let event = prepare_intent(&api, &mut params).await;

        assert_eq!(
            event,
            FlowEvent::IntentReady(ClientSecret::new("pi_for_price_first_secret_x"))
        );
        assert_eq!(params.price_id.as_deref(), Some("price_first"));
    }

    #[tokio::test]
    async fn test_prepare_intent_with_empty_catalog() {
        let api = FakeApi::new(Vec::new());

        let event = prepare_intent(&api, &mut CheckoutParams::default()).await;

        assert_eq!(event, FlowEvent::IntentFailed("No products available".into()));
        assert!(api.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_prepare_intent_surfaces_api_message() {
        let mut api = FakeApi::new(Vec::new());
        api.reject_with = Some(FlowError::Api {
            status: 400,
            message: "Price amount must be greater than 0".into(),
        });
        let mut params = query(&[("priceId", "price_zero_amount")]);

        let event = prepare_intent(&api, &mut params).await;

        assert_eq!(
            event,
            FlowEvent::IntentFailed("Price amount must be greater than 0".into())
        );
    }

    #[tokio::test]
    async fn test_submit_outcomes() {
        let params = query(&[("email", "a@b.co"), ("country", "UK"), ("postal_code", "WS11 1AA")]);
        let url = params.return_url("https://shop.example");

        let ok = FakeWidget::confirming(Ok(ConfirmOutcome::Completed));
        assert_eq!(submit_payment(&ok, &params, &url).await, FlowEvent::Confirmed);
        let billing = ok.billing_seen.borrow().clone().unwrap();
        assert_eq!(billing.address.country.as_deref(), Some("GB"));

        let declined = FakeWidget::confirming(Ok(ConfirmOutcome::Declined(Some(
            "Your card was declined.".into(),
        ))));
        assert_eq!(
            submit_payment(&declined, &params, &url).await,
            FlowEvent::ConfirmFailed("Your card was declined.".into())
        );

        let silent = FakeWidget::confirming(Ok(ConfirmOutcome::Declined(None)));
        assert_eq!(
            submit_payment(&silent, &params, &url).await,
            FlowEvent::ConfirmFailed("Payment failed".into())
        );

        let broken = FakeWidget::confirming(Err(FlowError::Widget("stripe not loaded".into())));
        assert_eq!(
            submit_payment(&broken, &params, &url).await,
            FlowEvent::ConfirmFailed("Something went wrong".into())
        );
    }

    #[tokio::test]
    async fn test_return_with_succeeded_intent_skips_form() {
        let widget = FakeWidget::confirming(Ok(ConfirmOutcome::Completed))
            .with_status("pi_old_secret_z", IntentStatus::Succeeded);
        let params = query(&[("success", "true"), (RETURNED_SECRET_PARAM, "pi_old_secret_z")]);

        let event = reconcile_return(&widget, &params, None).await;

        assert_eq!(event, Some(FlowEvent::ReturnSucceeded));
        assert!(CheckoutState::Initializing.apply(event.unwrap()).is_succeeded());
    }

    #[tokio::test]
    async fn test_return_uses_known_secret_without_returned_one() {
        let known = ClientSecret::new("pi_known_secret_k");
        let widget = FakeWidget::confirming(Ok(ConfirmOutcome::Completed))
            .with_status("pi_known_secret_k", IntentStatus::Succeeded);
        let params = query(&[("success", "true")]);

        assert_eq!(
            reconcile_return(&widget, &params, Some(&known)).await,
            Some(FlowEvent::ReturnSucceeded)
        );
    }

    #[tokio::test]
    async fn test_return_without_marker_or_success_does_nothing() {
        let known = ClientSecret::new("pi_known_secret_k");
        let widget = FakeWidget::confirming(Ok(ConfirmOutcome::Completed))
            .with_status("pi_known_secret_k", IntentStatus::RequiresAction);

        assert_eq!(reconcile_return(&widget, &query(&[]), Some(&known)).await, None);
        assert_eq!(
            reconcile_return(&widget, &query(&[("success", "true")]), Some(&known)).await,
            None
        );
        assert_eq!(
            reconcile_return(&widget, &query(&[("success", "true")]), None).await,
            None
        );
    }

    #[test]
    fn test_return_url_keeps_price_and_buyer_hints() {
        let params = query(&[
            ("priceId", "price_wanted"),
            ("email", "a@b.co"),
            ("country", "UK"),
            ("postal_code", "WS11 1AA"),
        ]);

        assert_eq!(
            params.return_url("https://shop.example/"),
            "https://shop.example/checkout-elements?priceId=price_wanted&email=a%40b.co\
             &country=GB&postal_code=WS11+1AA&success=true"
        );
        assert_eq!(
            CheckoutParams::default().return_url("https://shop.example"),
            "https://shop.example/checkout-elements?success=true"
        );
    }

    /// Query the platform sends the buyer back with after a challenge
    fn returned(redirect_status: &str) -> CheckoutParams {
        let params = query(&[
            ("priceId", "price_wanted"),
            ("email", "a@b.co"),
            ("country", "UK"),
            ("postal_code", "WS11 1AA"),
        ]);
        let url = params.return_url("https://shop.example");
        let (_, query_string) = url.split_once('?').unwrap();
        let map: HashMap<String, String> = url::form_urlencoded::parse(query_string.as_bytes())
            .into_owned()
            .chain([
                ("payment_intent".to_string(), "pi_old".to_string()),
                (RETURNED_SECRET_PARAM.to_string(), "pi_old_secret_z".to_string()),
                ("redirect_status".to_string(), redirect_status.to_string()),
            ])
            .collect();
        CheckoutParams::from_query(|key| map.get(key).cloned())
    }

    #[tokio::test]
    async fn test_failed_return_reopens_the_same_checkout() {
        let api = FakeApi::new(vec![listing("price_first")]);
        let widget = FakeWidget::confirming(Ok(ConfirmOutcome::Completed))
            .with_status("pi_old_secret_z", IntentStatus::RequiresPaymentMethod);
        let mut params = returned("failed");

        let event = initialize(&api, &widget, &mut params).await;

        assert_eq!(
            event,
            FlowEvent::IntentReady(ClientSecret::new("pi_for_price_wanted_secret_x"))
        );
        let sent = api.requests.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].price_id(), Some("price_wanted"));
        assert_eq!(sent[0].email(), Some("a@b.co"));
        let address = sent[0].address().unwrap();
        assert_eq!(address.country.as_deref(), Some("GB"));
        assert_eq!(address.postal_code.as_deref(), Some("WS11 1AA"));
    }

    #[tokio::test]
    async fn test_succeeded_return_creates_no_new_intent() {
        let api = FakeApi::new(vec![listing("price_first")]);
        let widget = FakeWidget::confirming(Ok(ConfirmOutcome::Completed))
            .with_status("pi_old_secret_z", IntentStatus::Succeeded);
        let mut params = returned("succeeded");

        let event = initialize(&api, &widget, &mut params).await;

        assert_eq!(event, FlowEvent::ReturnSucceeded);
        assert!(api.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_fresh_page_prepares_intent_without_status_check() {
        let api = FakeApi::new(vec![listing("price_first")]);
        let widget = FakeWidget::confirming(Ok(ConfirmOutcome::Completed));
        let mut params = query(&[("priceId", "price_wanted")]);

        let event = initialize(&api, &widget, &mut params).await;

        assert_eq!(
            event,
            FlowEvent::IntentReady(ClientSecret::new("pi_for_price_wanted_secret_x"))
        );
    }
}
