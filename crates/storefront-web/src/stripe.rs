//! Stripe.js Bindings
//!
//! Raw wasm-bindgen handles for Stripe.js v3 plus [`StripeJs`], which
//! implements [`PaymentConfirmer`] for the checkout flow.

use async_trait::async_trait;
use gloo_utils::format::JsValueSerdeExt;
use js_sys::{Object, Promise, Reflect};
use serde::Deserialize;
use serde_json::json;
use storefront_core::{
    flow::ConfirmOutcome, BillingDetails, ClientSecret, FlowError, IntentStatus,
    PaymentConfirmer, Result,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    /// `Stripe(publishableKey)` instance
    #[derive(Debug, Clone)]
    pub type JsStripe;

    /// `stripe.elements(...)` group
    #[derive(Debug, Clone)]
    pub type JsElements;

    /// Mounted Payment Element
    #[derive(Debug, Clone)]
    pub type JsPaymentElement;

    #[wasm_bindgen(catch, js_name = Stripe)]
    fn new_stripe(publishable_key: &str) -> std::result::Result<JsStripe, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn elements(this: &JsStripe, options: &JsValue) -> std::result::Result<JsElements, JsValue>;

    #[wasm_bindgen(method, catch, js_name = create)]
    fn create_element(
        this: &JsElements,
        element_type: &str,
        options: &JsValue,
    ) -> std::result::Result<JsPaymentElement, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn mount(this: &JsPaymentElement, selector: &str) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = confirmPayment)]
    fn confirm_payment(this: &JsStripe, options: &JsValue) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = retrievePaymentIntent)]
    fn retrieve_payment_intent(
        this: &JsStripe,
        client_secret: &str,
    ) -> std::result::Result<Promise, JsValue>;
}

/// `{ error?, paymentIntent? }` resolved by Stripe.js calls
#[derive(Debug, Default, Deserialize)]
struct StripeResult {
    #[serde(default)]
    error: Option<StripeJsError>,
    #[serde(default, rename = "paymentIntent")]
    payment_intent: Option<IntentSnapshot>,
}

#[derive(Debug, Deserialize)]
struct StripeJsError {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IntentSnapshot {
    status: IntentStatus,
}

/// Stripe.js client, optionally with a mounted payment form
#[derive(Clone, Debug)]
pub struct StripeJs {
    stripe: JsStripe,
    elements: Option<JsElements>,
}

impl StripeJs {
    /// Create the Stripe.js client. Fails when the script is not loaded.
    pub fn load(publishable_key: &str) -> Result<Self> {
        let stripe = new_stripe(publishable_key).map_err(widget_error)?;
        Ok(Self {
            stripe,
            elements: None,
        })
    }

    /// Mount a card-only Payment Element for `secret` into `selector`.
    ///
    /// Billing detail fields are hidden; they are sent with the
    /// confirmation instead.
    pub fn mount_payment_form(&self, secret: &ClientSecret, selector: &str) -> Result<Self> {
        let elements = self
            .stripe
            .elements(&to_js(&json!({ "clientSecret": secret.expose() }))?)
            .map_err(widget_error)?;

        let options = json!({
            "fields": { "billingDetails": "never" },
            "paymentMethodOrder": ["card"],
        });
        elements
            .create_element("payment", &to_js(&options)?)
            .map_err(widget_error)?
            .mount(selector)
            .map_err(widget_error)?;

        Ok(Self {
            stripe: self.stripe.clone(),
            elements: Some(elements),
        })
    }

    async fn call(promise: std::result::Result<Promise, JsValue>) -> Result<StripeResult> {
        let value = JsFuture::from(promise.map_err(widget_error)?)
            .await
            .map_err(widget_error)?;
        value
            .into_serde::<StripeResult>()
            .map_err(|e| FlowError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl PaymentConfirmer for StripeJs {
    async fn confirm_payment(
        &self,
        billing: &BillingDetails,
        receipt_email: Option<&str>,
        return_url: &str,
    ) -> Result<ConfirmOutcome> {
        let elements = self
            .elements
            .as_ref()
            .ok_or_else(|| FlowError::Widget("Payment form is not mounted".into()))?;

        let mut confirm_params = json!({
            "return_url": return_url,
            "payment_method_data": { "billing_details": billing },
        });
        if let Some(email) = receipt_email {
            confirm_params["receipt_email"] = json!(email);
        }

        let options = Object::new();
        set(&options, "elements", elements)?;
        set(&options, "confirmParams", &to_js(&confirm_params)?)?;
        set(&options, "redirect", &JsValue::from_str("if_required"))?;

        let result = Self::call(self.stripe.confirm_payment(&options)).await?;

        Ok(match result.error {
            Some(error) => ConfirmOutcome::Declined(error.message),
            None => ConfirmOutcome::Completed,
        })
    }

    async fn retrieve_status(&self, secret: &ClientSecret) -> Result<IntentStatus> {
        let result = Self::call(self.stripe.retrieve_payment_intent(secret.expose())).await?;

        match (result.error, result.payment_intent) {
            (None, Some(intent)) => Ok(intent.status),
            (Some(error), _) => Err(FlowError::Widget(
                error.message.unwrap_or_else(|| "Failed to retrieve payment".into()),
            )),
            (None, None) => Err(FlowError::Decode("No paymentIntent in response".into())),
        }
    }
}

fn to_js(value: &serde_json::Value) -> Result<JsValue> {
    JsValue::from_serde(value).map_err(|e| FlowError::Decode(e.to_string()))
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<()> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(widget_error)
}

fn widget_error(value: JsValue) -> FlowError {
    let message = Reflect::get(&value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    FlowError::Widget(message)
}
