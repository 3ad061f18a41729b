//! Billing details sent with payment confirmation
//!
//! The embedded payment form is mounted with its billing fields hidden, and
//! the platform then requires every billing field at confirmation time. What
//! the buyer told us (email, country, postcode) is sent as-is; the rest is
//! filled with the placeholders below.

use serde::Serialize;

use crate::model::Address;

pub const PLACEHOLDER_NAME: &str = "Customer";
pub const PLACEHOLDER_PHONE: &str = "+440000000000";
pub const PLACEHOLDER_ADDRESS_FIELD: &str = "N/A";

/// `payment_method_data.billing_details` in the confirmation call
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BillingDetails {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
    pub address: BillingAddress,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BillingAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub line1: String,
    pub city: String,
    pub state: String,
}

impl BillingDetails {
    /// Assemble billing details from buyer hints, normalizing the country
    pub fn assemble(email: Option<&str>, address: &Address) -> Self {
        let address = address.normalized();

        Self {
            name: PLACEHOLDER_NAME.into(),
            email: email
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string),
            phone: PLACEHOLDER_PHONE.into(),
            address: BillingAddress {
                country: address.country,
                postal_code: address.postal_code,
                line1: PLACEHOLDER_ADDRESS_FIELD.into(),
                city: PLACEHOLDER_ADDRESS_FIELD.into(),
                state: PLACEHOLDER_ADDRESS_FIELD.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_normalizes_country() {
        let details = BillingDetails::assemble(
            Some("buyer@example.com"),
            &Address::new(Some("UK".into()), Some("WS11 1AA".into())),
        );

        assert_eq!(details.address.country.as_deref(), Some("GB"));
        assert_eq!(details.address.postal_code.as_deref(), Some("WS11 1AA"));
        assert_eq!(details.email.as_deref(), Some("buyer@example.com"));
        assert_eq!(details.phone, PLACEHOLDER_PHONE);
    }

    #[test]
    fn test_wire_shape() {
        let details = BillingDetails::assemble(None, &Address::default());
        let json = serde_json::to_value(&details).unwrap();

        assert!(json.get("email").is_none());
        assert_eq!(json["address"]["line1"], "N/A");
        assert!(json["address"].get("country").is_none());
    }
}
