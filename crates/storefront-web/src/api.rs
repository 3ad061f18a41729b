//! API Client
//!
//! The storefront's JSON endpoints as seen from the browser.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};
use storefront_core::{
    CheckoutRequest, ClientSecret, ErrorBody, FlowError, ProductList, ProductListing, Result,
    StorefrontApi,
};

const FALLBACK_ERROR: &str = "Failed to prepare payment";

/// `window.location.origin`, empty outside a browser
pub fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntentBody {
    client_secret: ClientSecret,
}

/// HTTP implementation of [`StorefrontApi`]
pub struct HttpApi {
    client: reqwest::Client,
    /// reqwest needs absolute URLs, also in the browser
    base: String,
}

impl HttpApi {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base: origin(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

#[async_trait(?Send)]
impl StorefrontApi for HttpApi {
    async fn list_products(&self) -> Result<Vec<ProductListing>> {
        let response = self
            .client
            .get(self.url("/api/products"))
            .header("cache-control", "no-store")
            .send()
            .await
            .map_err(|e| FlowError::Network(e.to_string()))?;

        let list: ProductList = decode(response).await?;
        Ok(list.items)
    }

    async fn create_payment_intent(&self, request: &CheckoutRequest) -> Result<ClientSecret> {
        let response = self
            .client
            .post(self.url("/api/create-payment-intent"))
            .json(request)
            .send()
            .await
            .map_err(|e| FlowError::Network(e.to_string()))?;

        let body: IntentBody = decode(response).await?;
        Ok(body.client_secret)
    }
}

/// Decode a success body, or turn the `{error}` envelope into [`FlowError::Api`]
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| FlowError::Decode(e.to_string()));
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .map_or_else(|_| FALLBACK_ERROR.to_string(), |body| body.error);

    Err(FlowError::Api {
        status: status.as_u16(),
        message,
    })
}
