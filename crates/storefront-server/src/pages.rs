//! Server-Rendered Pages
//!
//! The storefront grid is rendered here from a fresh read of
//! `/api/products` at the configured catalog base URL. The checkout route
//! is only a shell; the WASM client mounts the embedded checkout into
//! `#checkout-root`.

use axum::{
    extract::{Query, State},
    http::header,
    response::Html,
};
use leptos::prelude::*;
use serde::Deserialize;

use storefront_core::{
    money::{truncate_description, DESCRIPTION_MAX_CHARS},
    Address, CheckoutRequest, ProductList, ProductListing,
};

use crate::state::AppState;

pub const STORE_NAME: &str = "Zarpado";

const STRIPE_JS: &str = "https://js.stripe.com/v3/";
const WASM_BOOT: &str = "import init from '/pkg/storefront_web.js'; init();";

/// Query parameters the storefront understands
#[derive(Debug, Default, Deserialize)]
pub struct StorefrontQuery {
    pub success: Option<String>,
    pub canceled: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

impl StorefrontQuery {
    /// Buyer hints forwarded into every Buy Control
    fn hints(&self) -> CheckoutRequest {
        CheckoutRequest::default()
            .with_email(self.email.clone())
            .with_address(Some(Address::new(
                self.country.clone(),
                self.postal_code.clone(),
            )))
    }

    fn banner(&self) -> Option<Banner> {
        if self.success.as_deref() == Some("true") {
            Some(Banner::Success)
        } else if self.canceled.as_deref() == Some("true") {
            Some(Banner::Canceled)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Banner {
    Success,
    Canceled,
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /`
pub async fn storefront(
    State(state): State<AppState>,
    Query(query): Query<StorefrontQuery>,
) -> Html<String> {
    let products = fetch_products(&state.http, &state.catalog_base_url).await;
    Html(render_storefront(&products, &query))
}

/// `GET /checkout-elements`
pub async fn checkout(State(state): State<AppState>) -> Html<String> {
    Html(render_checkout_shell(&state.publishable_key))
}

/// Read the catalog through the public endpoint, never cached.
///
/// Any failure degrades to an empty catalog.
pub async fn fetch_products(http: &reqwest::Client, base: &str) -> Vec<ProductListing> {
    let url = format!("{base}/api/products");

    let response = match http
        .get(&url)
        .header(header::CACHE_CONTROL.as_str(), "no-store")
        .send()
        .await
    {
        Ok(response) if response.status().is_success() => response,
        Ok(response) => {
            tracing::warn!(status = %response.status(), "Catalog endpoint failed");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(error = %e, url = %url, "Catalog endpoint unreachable");
            return Vec::new();
        }
    };

    match response.json::<ProductList>().await {
        Ok(list) => list.items,
        Err(e) => {
            tracing::warn!(error = %e, "Catalog response did not parse");
            Vec::new()
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

pub fn render_storefront(products: &[ProductListing], query: &StorefrontQuery) -> String {
    let hints = query.hints();
    let banner = query.banner();
    let products = products.to_vec();

    html_document(STORE_NAME, None, move || {
        view! {
            <header class="hero">
                <h1>{STORE_NAME}</h1>
                <p class="muted">"Pick an item and pay securely by card."</p>
            </header>
            {banner.map(|banner| view! { <StatusBanner banner=banner /> })}
            <main class="catalog">
                <section class="grid">
                    {if products.is_empty() {
                        view! {
                            <div class="empty">
                                "No products found. Ensure Stripe products with active prices exist."
                            </div>
                        }
                            .into_any()
                    } else {
                        products
                            .into_iter()
                            .map(|product| view! { <ProductCard product=product hints=hints.clone() /> })
                            .collect_view()
                            .into_any()
                    }}
                </section>
            </main>
        }
    })
}

pub fn render_checkout_shell(publishable_key: &str) -> String {
    html_document("Checkout", Some(publishable_key.to_string()), || {
        view! {
            <header class="hero">
                <h1>"Checkout"</h1>
                <p class="muted">"Secure payment powered by Stripe"</p>
            </header>
            <main id="checkout-root" class="checkout">
                <p class="muted">"Preparing payment\u{2026}"</p>
            </main>
        }
    })
}

/// Full HTML document around `body`.
///
/// Stripe.js is only loaded where a publishable key is given.
fn html_document<V>(title: &str, publishable_key: Option<String>, body: impl FnOnce() -> V) -> String
where
    V: IntoView + 'static,
{
    let title = format!("{title} | {STORE_NAME}");
    let owner = Owner::new();
    let html = owner.with(move || {
        let stripe = publishable_key.map(|key| {
            view! {
                <meta name="stripe-publishable-key" content=key />
                <script src=STRIPE_JS></script>
            }
        });

        view! {
            <html lang="en">
                <head>
                    <meta charset="utf-8" />
                    <meta name="viewport" content="width=device-width, initial-scale=1" />
                    <title>{title}</title>
                    <link rel="stylesheet" href="/static/style.css" />
                    {stripe}
                </head>
                <body>
                    {body()}
                    <script type="module" inner_html=WASM_BOOT></script>
                </body>
            </html>
        }
        .to_html()
    });

    format!("<!DOCTYPE html>{html}")
}

#[component]
fn StatusBanner(banner: Banner) -> impl IntoView {
    match banner {
        Banner::Success => view! {
            <div class="banner success">"Payment successful. Thanks for your order!"</div>
        }
        .into_any(),
        Banner::Canceled => view! {
            <div class="banner canceled">"Checkout canceled. You have not been charged."</div>
        }
        .into_any(),
    }
}

#[component]
fn ProductCard(product: ProductListing, hints: CheckoutRequest) -> impl IntoView {
    let price = product.display_price();
    let request = CheckoutRequest {
        price_id: Some(product.price_id.clone()),
        ..hints
    };
    let href = request.checkout_path();
    let address = request.address().unwrap_or_default();
    let email = request.email().map(str::to_string);
    let description = product
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| truncate_description(d, DESCRIPTION_MAX_CHARS));
    let name = product.name;

    view! {
        <article class="card">
            <div class="card-media">
                {match product.image {
                    Some(src) => view! { <img src=src alt=name.clone() loading="lazy" /> }.into_any(),
                    None => view! { <div class="no-image">"No image"</div> }.into_any(),
                }}
            </div>
            <h3>{name}</h3>
            {description.map(|text| view! { <p class="description">{text}</p> })}
            <div class="card-footer">
                <span class="price">{price}</span>
                <div
                    class="buy-slot"
                    data-price-id=product.price_id
                    data-email=email
                    data-country=address.country
                    data-postal-code=address.postal_code
                >
                    <a class="buy-button" href=href>"Buy"</a>
                </div>
            </div>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(price_id: &str, amount: i64) -> ProductListing {
        ProductListing {
            id: format!("prod_{price_id}"),
            name: "Zarpado Tee".into(),
            description: Some("Heavyweight cotton tee".into()),
            image: None,
            price_id: price_id.into(),
            currency: "usd".into(),
            unit_amount: Some(amount),
        }
    }

    fn card_count(html: &str) -> usize {
        html.matches(r#"<article class="card""#).count()
    }

    #[test]
    fn test_empty_catalog_renders_placeholder() {
        let html = render_storefront(&[], &StorefrontQuery::default());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("No products found."));
        assert_eq!(card_count(&html), 0);
    }

    #[test]
    fn test_cards_link_to_checkout() {
        let html = render_storefront(&[listing("price_1", 1000)], &StorefrontQuery::default());

        assert_eq!(card_count(&html), 1);
        assert!(html.contains("$10.00"));
        assert!(html.contains(r#"href="/checkout-elements?priceId=price_1""#));
        assert!(html.contains("No image"));
        assert!(!html.contains("No products found."));
    }

    #[test]
    fn test_buyer_hints_are_forwarded() {
        let query = StorefrontQuery {
            email: Some("a@b.co".into()),
            country: Some("UK".into()),
            postal_code: Some("SW1A 1AA".into()),
            ..Default::default()
        };

        let html = render_storefront(&[listing("price_1", 1000)], &query);

        assert!(html.contains("priceId=price_1&amp;email=a%40b.co&amp;country=GB&amp;postal_code=SW1A+1AA"));
        assert!(html.contains(r#"data-country="GB""#));
    }

    #[test]
    fn test_return_banners() {
        let success = StorefrontQuery {
            success: Some("true".into()),
            ..Default::default()
        };
        let canceled = StorefrontQuery {
            canceled: Some("true".into()),
            ..Default::default()
        };

        assert!(render_storefront(&[], &success).contains("Payment successful."));
        assert!(render_storefront(&[], &canceled).contains("Checkout canceled."));
        assert!(!render_storefront(&[], &StorefrontQuery::default()).contains("banner"));
    }

    #[test]
    fn test_long_description_is_truncated() {
        let mut product = listing("price_1", 1000);
        product.description = Some("x".repeat(400));

        let html = render_storefront(&[product], &StorefrontQuery::default());

        assert!(!html.contains(&"x".repeat(141)));
        assert!(html.contains('\u{2026}'));
    }

    #[test]
    fn test_checkout_shell_carries_publishable_key() {
        let html = render_checkout_shell("pk_test_123");

        assert!(html.contains(r#"content="pk_test_123""#));
        assert!(html.contains(STRIPE_JS));
        assert!(html.contains(r#"id="checkout-root""#));
        assert!(html.contains("/pkg/storefront_web.js"));
    }
}
