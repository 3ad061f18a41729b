//! Error Types

use thiserror::Error;

/// Result type alias for client-side flow operations
pub type Result<T> = std::result::Result<T, FlowError>;

/// Errors raised while driving a checkout from the browser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The storefront API answered with an error envelope
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// A response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The catalog is empty, so there is nothing to buy
    #[error("No products available")]
    NoProducts,

    /// The embedded payment widget failed outside of a decline
    #[error("Payment widget error: {0}")]
    Widget(String),
}

impl FlowError {
    /// Message shown while a payment is being prepared
    pub fn load_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::NoProducts => self.to_string(),
            _ => "Failed to prepare payment".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_message_forwards_api_message() {
        let err = FlowError::Api {
            status: 400,
            message: "Invalid price".into(),
        };
        assert_eq!(err.load_message(), "Invalid price");
    }

    #[test]
    fn test_load_message_hides_transport_detail() {
        let err = FlowError::Network("connection reset by peer".into());
        assert_eq!(err.load_message(), "Failed to prepare payment");
    }
}
