use dioxus::prelude::*;

use scm_common::assets::{placeholder_image_url, product_image_url, qr_display, QrDisplay};
use scm_common::display::{brand, format_price, is_deal, rating, review_count};
use scm_common::product::Product;

use super::app::Route;

/// Product image that swaps to the placeholder when the asset fails to load.
#[component]
pub fn ProductImage(product: Product, base_url: String, size: u32) -> Element {
    let mut failed = use_signal(|| false);
    let placeholder = placeholder_image_url(product.id.as_str(), size);
    let src = match product_image_url(&base_url, &product) {
        Some(url) if !failed() => url,
        _ => placeholder,
    };

    rsx! {
        img {
            class: "product-image",
            src: "{src}",
            alt: "{product.name}",
            loading: "lazy",
            onerror: move |_| failed.set(true),
        }
    }
}

/// QR code image, or a "no QR code" marker when it is missing or fails to load.
#[component]
pub fn QrImage(product: Product, base_url: String) -> Element {
    let mut failed = use_signal(|| false);

    match qr_display(&base_url, &product, failed()) {
        QrDisplay::Image(src) => rsx! {
            img {
                class: "qr-code",
                src: "{src}",
                alt: "QR code for {product.id}",
                onerror: move |_| failed.set(true),
            }
        },
        QrDisplay::Unavailable => rsx! {
            div { class: "qr-code qr-missing", "No QR code" }
        },
    }
}

#[component]
pub fn ProductCard(product: Product, base_url: String) -> Element {
    let id = product.id.to_string();
    let brand_name = brand(&product.name).to_string();
    let price = format_price(product.price);
    let stars = rating(&product);
    let reviews = review_count(&product);
    let deal = is_deal(&product);
    let verified = product.is_authentic();

    rsx! {
        Link { class: "product-card", to: Route::Product { id },
            div { class: "product-card-image",
                ProductImage { product: product.clone(), base_url, size: 400 }
                if deal {
                    span { class: "badge badge-deal", "Deal" }
                }
                if verified {
                    span { class: "badge badge-verified", "Verified" }
                }
            }
            div { class: "product-card-body",
                span { class: "brand", "{brand_name}" }
                h3 { "{product.name}" }
                p { class: "rating", "★ {stars} ({reviews})" }
                p { class: "price", "{price}" }
            }
        }
    }
}
