use dioxus::prelude::*;

use scm_common::api::{ApiError, CatalogueApi};
use scm_common::display::{confidence_percent, verification_label};
use scm_common::product::{Product, ProductId};
use scm_common::tracking::{current_step, timeline_steps, StepKind, TrackingStep};

use super::app::{use_catalogue, Route};
use super::product_card::QrImage;

fn step_icon(kind: StepKind) -> &'static str {
    match kind {
        StepKind::Manufactured => "🏭",
        StepKind::Inspected => "🔍",
        StepKind::InTransit => "🚚",
        StepKind::Delivered => "📦",
        StepKind::Other => "•",
    }
}

/// Read-only shipment timeline.
#[component]
pub fn TrackingTimeline(history: Vec<TrackingStep>) -> Element {
    let current = current_step(&history);
    let rows: Vec<(usize, TrackingStep, &'static str, &'static str)> = timeline_steps(&history)
        .into_iter()
        .enumerate()
        .map(|(idx, step)| {
            let class = if step.completed {
                "timeline-step completed"
            } else if current == Some(idx) {
                "timeline-step current"
            } else {
                "timeline-step"
            };
            let icon = step_icon(step.kind());
            (idx, step, class, icon)
        })
        .collect();

    rsx! {
        ol { class: "timeline",
            for (idx, step, class, icon) in rows {
                li { key: "{idx}", class: "{class}",
                    span { class: "timeline-icon", "{icon}" }
                    div { class: "timeline-body",
                        strong { "{step.status}" }
                        span { class: "timeline-date", "{step.date}" }
                        span { class: "timeline-loc", "{step.loc}" }
                    }
                }
            }
        }
    }
}

/// Public tracking page, the target of a product's QR code.
#[component]
pub fn TrackingPage(id: String) -> Element {
    let client = use_catalogue();
    let base_url = client.base_url().to_string();
    let product_id = ProductId::new(id.clone());

    let product = use_resource(move || {
        let client = client.clone();
        let product_id = product_id.clone();
        async move { client.get_product(&product_id).await }
    });

    let content = match &*product.read() {
        None => rsx! { p { class: "loading", "Loading tracking history..." } },
        Some(Err(ApiError::NotFound(_))) => rsx! {
            div { class: "not-found",
                h2 { "Product not found" }
                p { "No product with id {id} is registered." }
            }
        },
        Some(Err(e)) => {
            tracing::warn!("Failed to load tracking for {id}: {e}");
            rsx! { p { class: "empty-state", "Tracking is unavailable right now." } }
        }
        Some(Ok(product)) => tracking_summary(product, &base_url),
    };

    rsx! {
        div { class: "tracking-page",
            {content}
            Link { to: Route::Home {}, "Browse the catalogue" }
        }
    }
}

fn tracking_summary(product: &Product, base_url: &str) -> Element {
    let label = verification_label(product);
    let confidence = confidence_percent(product);
    let detail_route = Route::Product {
        id: product.id.to_string(),
    };

    rsx! {
        div { class: "tracking-summary",
            h2 { "{product.name}" }
            p { class: "verification", "{label} · {confidence} confidence" }
            p { class: "hash mono", "{product.short_hash}" }
            QrImage { product: product.clone(), base_url: base_url.to_string() }
            TrackingTimeline { history: product.tracking_history.clone() }
            Link { to: detail_route, "View product" }
        }
    }
}
