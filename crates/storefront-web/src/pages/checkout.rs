//! Embedded Checkout Page
//!
//! Drives [`CheckoutState`] from the query string, our API and Stripe.js.
//! The payment form stays in the DOM for the whole attempt so the mounted
//! Stripe iframe survives re-renders; it is only hidden.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;
use storefront_core::{
    flow::{self, CheckoutParams, CheckoutState, FlowEvent},
    locale::country_display_name,
};

use crate::api::{origin, HttpApi};
use crate::components::SuccessView;
use crate::stripe::StripeJs;

const PAYMENT_ELEMENT_ID: &str = "payment-element";
const PUBLISHABLE_KEY_META: &str = "meta[name=\"stripe-publishable-key\"]";

fn dispatch(state: RwSignal<CheckoutState>, event: FlowEvent) {
    state.update(|current| *current = std::mem::take(current).apply(event));
}

fn publishable_key() -> Option<String> {
    web_sys::window()?
        .document()?
        .query_selector(PUBLISHABLE_KEY_META)
        .ok()??
        .get_attribute("content")
        .filter(|key| !key.is_empty())
}

#[component]
pub fn CheckoutPage() -> impl IntoView {
    let query = use_query_map();
    let params = query.with_untracked(|q| CheckoutParams::from_query(|key| q.get(key)));
    let address = params.address.clone();
    let params = StoredValue::new(params);

    let state = RwSignal::new(CheckoutState::default());
    let form = StoredValue::new_local(None::<StripeJs>);
    let form_ready = RwSignal::new(false);

    let stripe = publishable_key()
        .ok_or_else(|| "Stripe publishable key missing from page".to_string())
        .and_then(|key| StripeJs::load(&key).map_err(|e| e.to_string()));

    match stripe {
        Ok(stripe) => start(state, params, form, form_ready, stripe),
        Err(e) => {
            leptos::logging::error!("Stripe.js unavailable: {e}");
            dispatch(state, FlowEvent::IntentFailed("Failed to prepare payment".into()));
        }
    }

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if !matches!(state.get_untracked(), CheckoutState::AwaitingPayment { .. }) {
            return;
        }
        let Some(widget) = form.get_value() else {
            return;
        };

        dispatch(state, FlowEvent::Submit);
        spawn_local(async move {
            let params = params.get_value();
            let return_url = params.return_url(&origin());
            let event = flow::submit_payment(&widget, &params, &return_url).await;
            dispatch(state, event);
        });
    };

    let show_form = move || {
        state.with(|s| {
            matches!(
                s,
                CheckoutState::AwaitingPayment { .. } | CheckoutState::Submitting { .. }
            )
        })
    };

    view! {
        <Show when=move || state.with(|s| matches!(s, CheckoutState::Initializing))>
            <p class="muted">"Preparing payment\u{2026}"</p>
        </Show>

        {move || {
            state
                .with(|s| match s {
                    CheckoutState::LoadError(message) => Some(message.clone()),
                    _ => None,
                })
                .map(|message| view! { <div class="load-error">{message}</div> })
        }}

        <Show when=move || state.with(CheckoutState::is_succeeded)>
            <SuccessView />
        </Show>

        <form class="payment-form" hidden=move || !show_form() on:submit=on_submit>
            <h3>"Payment"</h3>
            {(!address.is_empty()).then(|| {
                view! {
                    <dl class="summary">
                        <dt>"Country"</dt>
                        <dd>{address.country.as_deref().map(country_display_name)}</dd>
                        <dt>"Postcode"</dt>
                        <dd>{address.postal_code.clone()}</dd>
                    </dl>
                }
            })}
            <div id=PAYMENT_ELEMENT_ID></div>
            {move || {
                state
                    .with(|s| s.form_error().map(str::to_string))
                    .map(|error| view! { <div class="form-error">{error}</div> })
            }}
            <button
                type="submit"
                class="btn"
                disabled=move || state.with(CheckoutState::is_submitting) || !form_ready.get()
            >
                {move || if state.with(CheckoutState::is_submitting) { "Processing\u{2026}" } else { "Pay now" }}
            </button>
        </form>
    }
}

/// Settle the page (return reconciliation, then intent preparation) and
/// mount the payment form once a client secret is known
fn start(
    state: RwSignal<CheckoutState>,
    params: StoredValue<CheckoutParams>,
    form: StoredValue<Option<StripeJs>, LocalStorage>,
    form_ready: RwSignal<bool>,
    stripe: StripeJs,
) {
    {
        let stripe = stripe.clone();
        spawn_local(async move {
            let mut current = params.get_value();
            let event = flow::initialize(&HttpApi::new(), &stripe, &mut current).await;
            params.set_value(current);
            dispatch(state, event);
        });
    }

    let selector = format!("#{PAYMENT_ELEMENT_ID}");
    let stripe = StoredValue::new_local(stripe);
    Effect::new(move |_| {
        let Some(secret) = state.with(|s| s.client_secret().cloned()) else {
            return;
        };
        if form.with_value(Option::is_some) {
            return;
        }

        match stripe.with_value(|stripe| stripe.mount_payment_form(&secret, &selector)) {
            Ok(mounted) => {
                form.set_value(Some(mounted));
                form_ready.set(true);
            }
            Err(e) => leptos::logging::error!("Failed to mount payment form: {e}"),
        }
    });
}
