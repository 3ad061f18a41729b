//! Storefront Data Model
//!
//! Wire shapes shared by the JSON API and the browser client. Field names
//! follow the storefront's camelCase JSON, except the address block which
//! keeps the platform's `postal_code` spelling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::locale::normalize_country;
use crate::money;

/// Client route that hosts the embedded checkout
pub const CHECKOUT_ROUTE: &str = "/checkout-elements";

// ============================================================================
// Catalog
// ============================================================================

/// A purchasable product as shown on the storefront
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    /// Platform product id
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// First product image, if any
    #[serde(default)]
    pub image: Option<String>,
    /// Price to charge when this listing is bought
    pub price_id: String,
    /// ISO 4217 code as reported by the platform (lowercase)
    pub currency: String,
    /// Amount in the smallest currency unit
    #[serde(default)]
    pub unit_amount: Option<i64>,
}

impl ProductListing {
    /// Locale-formatted price, or a dash when the amount is unknown
    pub fn display_price(&self) -> String {
        self.unit_amount.map_or_else(
            || "\u{2014}".to_string(),
            |amount| money::format_amount(amount, &self.currency),
        )
    }
}

/// `GET /api/products` response body
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductList {
    pub items: Vec<ProductListing>,
}

/// `{ "error": "..." }` envelope used by every failing API response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

// ============================================================================
// Checkout Request
// ============================================================================

/// Buyer address hints forwarded to the payments platform
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, alias = "postalCode", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl Address {
    pub fn new(country: Option<String>, postal_code: Option<String>) -> Self {
        Self {
            country,
            postal_code,
        }
    }

    /// Copy with an ISO country code and blank fields dropped
    pub fn normalized(&self) -> Self {
        Self {
            country: self.country.as_deref().and_then(normalize_country),
            postal_code: non_blank(self.postal_code.as_deref()),
        }
    }

    pub fn is_empty(&self) -> bool {
        non_blank(self.country.as_deref()).is_none()
            && non_blank(self.postal_code.as_deref()).is_none()
    }
}

/// Body of `POST /api/checkout` and `POST /api/create-payment-intent`.
///
/// Carries no amount. The charge is derived from the price on the server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl CheckoutRequest {
    /// Request for a single price with no buyer hints
    pub fn for_price(price_id: impl Into<String>) -> Self {
        Self {
            price_id: Some(price_id.into()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    #[must_use]
    pub fn with_address(mut self, address: Option<Address>) -> Self {
        self.address = address;
        self
    }

    /// Trimmed price id, `None` when absent or blank
    pub fn price_id(&self) -> Option<&str> {
        non_blank_ref(self.price_id.as_deref())
    }

    /// Trimmed email, `None` when absent or blank
    pub fn email(&self) -> Option<&str> {
        non_blank_ref(self.email.as_deref())
    }

    /// Normalized address, `None` when it carries nothing
    pub fn address(&self) -> Option<Address> {
        self.address
            .as_ref()
            .map(Address::normalized)
            .filter(|a| !a.is_empty())
    }

    /// Query string understood by the embedded checkout route
    pub fn checkout_query(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if let Some(price_id) = self.price_id() {
            query.append_pair("priceId", price_id);
        }
        if let Some(email) = self.email() {
            query.append_pair("email", email);
        }
        if let Some(address) = self.address() {
            if let Some(country) = &address.country {
                query.append_pair("country", country);
            }
            if let Some(postal_code) = &address.postal_code {
                query.append_pair("postal_code", postal_code);
            }
        }
        query.finish()
    }

    /// Path + query of the embedded checkout for this request
    pub fn checkout_path(&self) -> String {
        let query = self.checkout_query();
        if query.is_empty() {
            CHECKOUT_ROUTE.to_string()
        } else {
            format!("{CHECKOUT_ROUTE}?{query}")
        }
    }
}

// ============================================================================
// Opaque Handles
// ============================================================================

/// Client secret of a payment intent.
///
/// Grants confirmation rights for exactly one intent. It has no `Display`
/// and its `Debug` output is redacted so it cannot end up in logs by
/// accident; call [`ClientSecret::expose`] where the raw value is needed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientSecret(String);

impl ClientSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Raw secret for handing to the payment widget
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Id of the intent this secret belongs to (`pi_..._secret_...`)
    pub fn payment_intent_id(&self) -> Option<&str> {
        self.0.split_once("_secret_").map(|(id, _)| id)
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(<redacted>)")
    }
}

/// Hosted checkout session id.
///
/// Handed to the buyer's browser only, so it gets the same treatment as
/// [`ClientSecret`]: no `Display`, redacted `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw id for redirecting the buyer
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionId(<redacted>)")
    }
}

/// Payment intent lifecycle status as reported by the platform
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
    #[serde(other)]
    Unknown,
}

impl IntentStatus {
    pub const fn is_succeeded(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl FromStr for IntentStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "requires_payment_method" => Self::RequiresPaymentMethod,
            "requires_confirmation" => Self::RequiresConfirmation,
            "requires_action" => Self::RequiresAction,
            "processing" => Self::Processing,
            "requires_capture" => Self::RequiresCapture,
            "canceled" => Self::Canceled,
            "succeeded" => Self::Succeeded,
            _ => Self::Unknown,
        })
    }
}

fn non_blank_ref(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    non_blank_ref(value).map(str::to_string)
}
