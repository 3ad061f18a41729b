//! Catalog Fetcher
//!
//! Lists active prices with their products and projects them into
//! display-ready listings.

use storefront_core::ProductListing;

use crate::error::Result;
use crate::gateway::{PaymentGateway, PriceRecord, ProductRef};

/// Single page of prices; the storefront does not paginate further
pub const CATALOG_PAGE_SIZE: u64 = 100;

/// Fetch the current catalog
pub async fn list_products(gateway: &dyn PaymentGateway) -> Result<Vec<ProductListing>> {
    let prices = gateway
        .list_active_prices(CATALOG_PAGE_SIZE)
        .await
        .inspect_err(|e| e.report("Error fetching products"))?;

    let listings = project(prices);
    tracing::debug!(count = listings.len(), "Loaded catalog");

    Ok(listings)
}

/// Keep prices with a numeric amount and an expanded product
pub fn project(prices: Vec<PriceRecord>) -> Vec<ProductListing> {
    prices
        .into_iter()
        .filter_map(|price| {
            let unit_amount = price.unit_amount?;
            let ProductRef::Resolved(product) = price.product else {
                return None;
            };

            Some(ProductListing {
                id: product.id,
                name: product.name,
                description: product.description,
                image: product.images.into_iter().next(),
                price_id: price.id,
                currency: price.currency.unwrap_or_default(),
                unit_amount: Some(unit_amount),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaymentError;
    use crate::gateway::InMemoryGateway;

    #[tokio::test]
    async fn test_list_products_filters_incomplete_entries() {
        let gateway = InMemoryGateway::new();

        let listings = list_products(&gateway).await.unwrap();

        let ids: Vec<_> = listings.iter().map(|l| l.price_id.as_str()).collect();
        assert_eq!(
            ids,
            ["price_valid_1000usd", "price_gbp_2500", "price_zero_amount"]
        );
        assert!(listings.iter().all(|l| l.unit_amount.is_some()));
    }

    #[tokio::test]
    async fn test_listing_takes_first_image() {
        let gateway = InMemoryGateway::new();

        let listings = list_products(&gateway).await.unwrap();

        let tee = &listings[0];
        assert_eq!(tee.id, "prod_tee");
        assert_eq!(tee.name, "Zarpado Tee");
        assert_eq!(
            tee.image.as_deref(),
            Some("https://files.stripe.com/links/zarpado-tee.png")
        );
        assert_eq!(tee.currency, "usd");
        assert_eq!(listings[1].image, None);
    }

    #[tokio::test]
    async fn test_platform_failure_is_an_error() {
        let gateway = InMemoryGateway::unavailable();

        let err = list_products(&gateway).await.unwrap_err();

        assert!(matches!(err, PaymentError::Upstream { .. }));
        assert_eq!(err.user_message(), "Failed to load products");
    }

    #[test]
    fn test_project_drops_missing_product() {
        let prices = vec![PriceRecord {
            id: "price_orphan".into(),
            unit_amount: Some(100),
            currency: Some("usd".into()),
            product: ProductRef::Missing,
        }];
        assert!(project(prices).is_empty());
    }
}
