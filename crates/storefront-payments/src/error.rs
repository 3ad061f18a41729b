//! Payment Error Types

use std::fmt;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payments platform call that failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    ListPrices,
    RetrievePrice,
    CreatePaymentIntent,
    CreateCustomer,
    CreateCheckoutSession,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ListPrices => "list prices",
            Self::RetrievePrice => "retrieve price",
            Self::CreatePaymentIntent => "create payment intent",
            Self::CreateCustomer => "create customer",
            Self::CreateCheckoutSession => "create checkout session",
        })
    }
}

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Request did not name a price
    #[error("Missing priceId")]
    MissingPriceId,

    /// Price is unknown or unusable (no amount, no currency)
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Price exists but would charge nothing
    #[error("Price amount must be greater than 0")]
    NonPositiveAmount,

    /// Stripe API error
    #[error("Stripe error during {operation}: {message}")]
    Upstream {
        operation: Operation,
        message: String,
        status: Option<u16>,
    },
}

impl PaymentError {
    pub fn upstream(operation: Operation, message: impl Into<String>) -> Self {
        Self::Upstream {
            operation,
            message: message.into(),
            status: None,
        }
    }

    /// HTTP status the storefront answers with
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MissingPriceId | Self::InvalidPrice(_) | Self::NonPositiveAmount => 400,
            Self::Upstream { .. } => 500,
        }
    }

    /// Get user-friendly message.
    ///
    /// Platform failures are answered with a fixed message per operation;
    /// their detail only goes to the server log.
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingPriceId => "Missing priceId",
            Self::InvalidPrice(_) => "Invalid price",
            Self::NonPositiveAmount => "Price amount must be greater than 0",
            Self::Upstream { operation, .. } => match operation {
                Operation::ListPrices => "Failed to load products",
                Operation::RetrievePrice | Operation::CreatePaymentIntent => {
                    "Failed to create payment intent"
                }
                Operation::CreateCustomer | Operation::CreateCheckoutSession => {
                    "Failed to create checkout session"
                }
            },
        }
    }

    /// HTTP status the platform answered with, when it answered at all
    pub const fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => *status,
            _ => None,
        }
    }

    /// Log this error with full detail
    pub fn report(&self, context: &str) {
        if self.status_code() >= 500 {
            tracing::error!(error = %self, upstream_status = ?self.upstream_status(), "{context}");
        } else {
            tracing::warn!(error = %self, "{context}");
        }
    }
}

#[cfg(feature = "axum-handlers")]
impl axum::response::IntoResponse for PaymentError {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.status_code())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            axum::Json(storefront_core::ErrorBody::new(self.user_message())),
        )
            .into_response()
    }
}
