use dioxus::prelude::*;

use scm_common::product::ProductId;
use scm_common::storefront::{similar_products, SIMILAR_PRODUCTS_CAP};

use super::app::use_catalogue;
use super::product_card::ProductCard;

/// "You may also like" strip under the product detail. Renders nothing when
/// there is nothing similar or the lookup failed.
#[component]
pub fn SimilarProducts(id: String, name: String) -> Element {
    let client = use_catalogue();
    let base_url = client.base_url().to_string();

    let similar = use_resource(move || {
        let client = client.clone();
        let current = ProductId::new(id.clone());
        let name = name.clone();
        async move { similar_products(&client, &name, &current, SIMILAR_PRODUCTS_CAP).await }
    });

    let products = similar.read().clone().unwrap_or_default();
    if products.is_empty() {
        return rsx! {};
    }

    rsx! {
        section { class: "similar-products",
            h3 { "Similar products" }
            div { class: "product-grid",
                for product in products {
                    ProductCard { key: "{product.id}", product, base_url: base_url.clone() }
                }
            }
        }
    }
}
