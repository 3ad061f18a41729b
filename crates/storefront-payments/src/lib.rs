//! # storefront-payments
//!
//! Catalog and checkout operations for the storefront, backed by a payments
//! platform.
//!
//! ## Stripe Integration Strategies
//!
//! This crate supports two Stripe integration approaches:
//!
//! ### 1. Stripe Checkout (Hosted)
//!
//! **Flow:** Storefront → Redirect to Stripe's hosted page → Redirect back
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌──────────────────┐
//! │ Storefront  │────▶│  Stripe Hosted  │────▶│ /?success=true   │
//! │  (buy)      │     │  Checkout Page  │     │ /?canceled=true  │
//! └─────────────┘     └─────────────────┘     └──────────────────┘
//! ```
//!
//! See [`session::create_session`].
//!
//! ### 2. Stripe Elements (Embedded) - the storefront's checkout
//!
//! **Flow:** Payment form embedded in `/checkout-elements`, confirmed in the
//! browser against a payment intent created here.
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │          /checkout-elements             │
//! │  ┌────────────────────────────────┐    │
//! │  │   Stripe Elements (iframe)     │    │
//! │  │   Card Number: ████ ████ ████  │    │
//! │  └────────────────────────────────┘    │
//! └────────────────────────────────────────┘
//! ```
//!
//! See [`intent::create_intent`].
//!
//! In both cases the amount is read from the price on the platform at call
//! time; nothing the browser sends can change it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_core::CheckoutRequest;
//! use storefront_payments::{intent, StripeGateway};
//!
//! let gateway = StripeGateway::new("sk_test_xxx");
//!
//! let secret = intent::create_intent(
//!     &gateway,
//!     &CheckoutRequest::for_price("price_123"),
//! ).await?;
//!
//! // Hand secret.expose() to Stripe Elements in the browser
//! ```

pub mod catalog;
pub mod error;
pub mod gateway;
pub mod intent;
pub mod session;

pub use error::{Operation, PaymentError, Result};
pub use gateway::{InMemoryGateway, PaymentGateway, StripeGateway};
