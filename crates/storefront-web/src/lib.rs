//! Storefront Web Client
//!
//! Leptos-based WASM client. On the checkout page it mounts the embedded
//! checkout into `#checkout-root`; on the storefront it upgrades every
//! server-rendered Buy link into a [`components::BuyButton`].

mod api;
mod app;
mod components;
mod pages;
mod stripe;

pub use app::App;

use leptos::prelude::*;
use storefront_core::{Address, CheckoutRequest};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::components::BuyButton;

const CHECKOUT_ROOT_ID: &str = "checkout-root";
const BUY_SLOT_SELECTOR: &str = ".buy-slot";

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if let Some(root) = document.get_element_by_id(CHECKOUT_ROOT_ID) {
        root.set_inner_html("");
        leptos::mount::mount_to(root.unchecked_into::<HtmlElement>(), App).forget();
    } else {
        upgrade_buy_slots(&document);
    }
}

/// Replace each Buy link with the stateful button
fn upgrade_buy_slots(document: &Document) {
    let Ok(slots) = document.query_selector_all(BUY_SLOT_SELECTOR) else {
        return;
    };

    for index in 0..slots.length() {
        let Some(slot) = slots
            .item(index)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        let Some(request) = slot_request(&slot) else {
            leptos::logging::warn!("Buy slot without a price id");
            continue;
        };

        slot.set_inner_html("");
        leptos::mount::mount_to(slot, move || view! { <BuyButton request=request /> }).forget();
    }
}

/// Checkout request described by a slot's `data-*` attributes
fn slot_request(slot: &Element) -> Option<CheckoutRequest> {
    let price_id = slot.get_attribute("data-price-id")?;
    let address = Address::new(
        slot.get_attribute("data-country"),
        slot.get_attribute("data-postal-code"),
    );

    Some(
        CheckoutRequest::for_price(price_id)
            .with_email(slot.get_attribute("data-email"))
            .with_address(Some(address)),
    )
}
