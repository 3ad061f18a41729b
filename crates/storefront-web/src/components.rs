//! UI Components

use leptos::ev;
use leptos::prelude::*;
use storefront_core::{BuyControl, CheckoutRequest};

const GENERIC_ALERT: &str = "Something went wrong. Please try again.";

/// Buy Control: opens the embedded checkout for one price.
///
/// Disabled from the click until the navigation ends. A failure re-enables
/// it and tells the buyer; so does the storefront being shown again from
/// the back/forward cache.
#[component]
pub fn BuyButton(request: CheckoutRequest) -> impl IntoView {
    let control = RwSignal::new(BuyControl::default());

    // Stays registered for the life of the page.
    let _ = window_event_listener(ev::pageshow, move |event| {
        if event.persisted() {
            control.update(BuyControl::settle);
        }
    });

    let buy = move |_| {
        if !control.try_update(BuyControl::click).unwrap_or(false) {
            return;
        }

        if let Err(e) = open(&request.checkout_path()) {
            leptos::logging::error!("Failed to open checkout: {e:?}");
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(GENERIC_ALERT);
            }
            control.update(BuyControl::settle);
        }
    };

    view! {
        <button class="buy-button" on:click=buy disabled=move || control.get().is_busy()>
            {move || control.get().label()}
        </button>
    }
}

fn open(path: &str) -> Result<(), wasm_bindgen::JsValue> {
    let window = web_sys::window().ok_or_else(|| wasm_bindgen::JsValue::from_str("no window"))?;
    window.location().set_href(path)
}

/// Shown once the payment went through
#[component]
pub fn SuccessView() -> impl IntoView {
    view! {
        <div class="success">
            <h2>"Payment successful"</h2>
            <p class="muted">"Thanks! Your payment went through."</p>
            <a href="/" class="btn">"Back to home"</a>
        </div>
    }
}
