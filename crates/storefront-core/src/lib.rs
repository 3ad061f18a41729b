//! # storefront-core
//!
//! Platform-neutral storefront types shared by the server and the WASM client.
//!
//! ## Checkout Flow
//!
//! ```text
//! ┌──────────────┐  IntentReady   ┌─────────────────┐  Submit   ┌────────────┐
//! │ Initializing │───────────────▶│ AwaitingPayment │──────────▶│ Submitting │
//! └──────────────┘                └─────────────────┘◀──────────└────────────┘
//!        │ IntentFailed                   ▲        ConfirmFailed      │ Confirmed
//!        ▼                                │                           ▼
//! ┌──────────────┐                        │                    ┌────────────┐
//! │  LoadError   │      ReturnSucceeded (any state) ──────────▶│ Succeeded  │
//! └──────────────┘                                             └────────────┘
//! ```
//!
//! Amounts never travel from the client: a [`CheckoutRequest`] only names a
//! price, and the server re-reads the authoritative amount from the payments
//! platform.

pub mod billing;
pub mod buy;
pub mod error;
pub mod flow;
pub mod locale;
pub mod model;
pub mod money;

pub use billing::BillingDetails;
pub use buy::BuyControl;
pub use error::{FlowError, Result};
pub use flow::{CheckoutParams, CheckoutState, FlowEvent, PaymentConfirmer, StorefrontApi};
pub use model::{
    Address, CheckoutRequest, ClientSecret, ErrorBody, IntentStatus, ProductList, ProductListing,
    SessionId, CHECKOUT_ROUTE,
};
