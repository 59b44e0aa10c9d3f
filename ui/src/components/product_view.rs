use dioxus::prelude::*;

use scm_common::api::{ApiError, CatalogueApi};
use scm_common::display::{
    brand, confidence_percent, format_price, is_deal, product_type, rating, review_count,
    verification_label,
};
use scm_common::product::{Product, ProductId};
use scm_common::tracking::{StepField, TrackingEditor, TrackingStep};

use super::app::{use_catalogue, Route};
use super::product_card::{ProductImage, QrImage};
use super::similar_products::SimilarProducts;
use super::tracking_view::TrackingTimeline;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Details,
    Tracking,
}

/// Product detail page with an editable tracking tab.
#[component]
pub fn ProductView(id: String) -> Element {
    let client = use_catalogue();
    let product_id = ProductId::new(id.clone());

    let product = use_resource({
        let client = client.clone();
        let product_id = product_id.clone();
        move || {
            let client = client.clone();
            let product_id = product_id.clone();
            async move { client.get_product(&product_id).await }
        }
    });

    let loaded = product.read().clone();
    match loaded {
        None => rsx! { p { class: "loading", "Loading product..." } },
        Some(Err(ApiError::NotFound(_))) => rsx! {
            div { class: "not-found",
                h2 { "Product not found" }
                p { "No product with id {id} exists." }
                Link { to: Route::Home {}, "Back to the catalogue" }
            }
        },
        Some(Err(e)) => {
            tracing::warn!("Failed to load product {id}: {e}");
            rsx! {
                div { class: "empty-state",
                    p { "This product is unavailable right now." }
                    Link { to: Route::Home {}, "Back to the catalogue" }
                }
            }
        }
        Some(Ok(loaded)) => rsx! {
            ProductDetail { product: loaded }
        },
    }
}

#[component]
fn ProductDetail(product: Product) -> Element {
    let client = use_catalogue();
    let base_url = client.base_url().to_string();
    let mut tab = use_signal(|| Tab::Details);
    let history = product.tracking_history.clone();
    let mut editor = use_signal(move || TrackingEditor::new(history));

    let brand_name = brand(&product.name).to_string();
    let kind = product_type(&product.name);
    let price = format_price(product.price);
    let stars = rating(&product);
    let reviews = review_count(&product);
    let confidence = confidence_percent(&product);
    let label = verification_label(&product);
    let tracking_link = product.tracking_url.clone();

    rsx! {
        div { class: "product-detail",
            div { class: "product-detail-image",
                ProductImage { product: product.clone(), base_url: base_url.clone(), size: 800 }
            }
            div { class: "product-detail-info",
                span { class: "brand", "{brand_name}" }
                h2 { "{product.name}" }
                p { class: "product-type", "{kind} · {product.color} · {product.year}" }
                p { class: "rating", "★ {stars} ({reviews} reviews)" }
                p { class: "price",
                    "{price}"
                    if is_deal(&product) {
                        span { class: "badge badge-deal", "Deal" }
                    }
                }
                p { class: if product.is_authentic() { "verification verified" } else { "verification pending" },
                    "{label} · {confidence} confidence"
                }
            }

            div { class: "tabs",
                button {
                    class: if tab() == Tab::Details { "tab active" } else { "tab" },
                    onclick: move |_| {
                        // leaving the tab drops any unsaved draft
                        editor.write().discard();
                        tab.set(Tab::Details);
                    },
                    "Details"
                }
                button {
                    class: if tab() == Tab::Tracking { "tab active" } else { "tab" },
                    onclick: move |_| tab.set(Tab::Tracking),
                    "Tracking"
                }
            }

            if tab() == Tab::Details {
                table { class: "product-facts",
                    tbody {
                        tr { td { "Product ID" } td { class: "mono", "{product.id}" } }
                        tr { td { "Status" } td { "{product.predicted_status.label()}" } }
                        tr { td { "Metadata hash" } td { class: "mono", "{product.meta_hash}" } }
                        tr { td { "Product hash" } td { class: "mono", "{product.pid_hash}" } }
                    }
                }
                div { class: "qr-block",
                    QrImage { product: product.clone(), base_url: base_url.clone() }
                    if let Some(link) = tracking_link {
                        a { href: "{link}", "Public tracking page" }
                    }
                }
            } else {
                TrackingEditorPanel { id: product.id.to_string(), editor }
            }

            SimilarProducts { id: product.id.to_string(), name: product.name.clone() }
        }
    }
}

/// Tracking tab: timeline when viewing, step editor while editing.
#[component]
fn TrackingEditorPanel(id: String, editor: Signal<TrackingEditor>) -> Element {
    let client = use_catalogue();
    let mut editor = editor;
    let mut saving = use_signal(|| false);

    let save = move |_| {
        let Some(sent) = editor.peek().pending().map(<[TrackingStep]>::to_vec) else {
            return;
        };
        let client = client.clone();
        let product_id = ProductId::new(id.clone());
        saving.set(true);
        spawn(async move {
            match client.update_tracking(&product_id, &sent).await {
                Ok(updated) => editor.write().commit(&sent, updated.tracking_history),
                Err(e) => {
                    tracing::error!("Failed to save tracking for {product_id}: {e}");
                    alert(&format!("Could not save tracking history: {e}"));
                }
            }
            saving.set(false);
        });
    };

    let is_editing = editor.read().is_editing();
    if !is_editing {
        let saved = editor.read().saved().to_vec();
        return rsx! {
            div { class: "tracking-panel",
                TrackingTimeline { history: saved }
                button { onclick: move |_| editor.write().begin(), "Edit tracking" }
            }
        };
    }

    let steps = editor.read().steps().to_vec();
    let is_saving = *saving.read();

    rsx! {
        div { class: "tracking-panel editing",
            for (idx, step) in steps.into_iter().enumerate() {
                div { key: "{idx}", class: "step-editor",
                    input {
                        disabled: is_saving,
                        value: "{step.status}",
                        oninput: move |evt: FormEvent| editor.write().edit(idx, StepField::Status(evt.value())),
                    }
                    input {
                        r#type: "date",
                        disabled: is_saving,
                        value: "{step.date}",
                        oninput: move |evt: FormEvent| editor.write().edit(idx, StepField::Date(evt.value())),
                    }
                    input {
                        disabled: is_saving,
                        value: "{step.loc}",
                        oninput: move |evt: FormEvent| editor.write().edit(idx, StepField::Loc(evt.value())),
                    }
                    label {
                        input {
                            r#type: "checkbox",
                            disabled: is_saving,
                            checked: step.completed,
                            onchange: move |evt: FormEvent| editor.write().edit(idx, StepField::Completed(evt.checked())),
                        }
                        "Completed"
                    }
                    button { class: "remove-step", disabled: is_saving, onclick: move |_| editor.write().remove(idx), "Remove" }
                }
            }
            div { class: "editor-actions",
                button {
                    disabled: is_saving,
                    onclick: move |_| editor.write().append(chrono::Local::now().date_naive()),
                    "Add step"
                }
                button { disabled: is_saving, onclick: save, if is_saving { "Saving..." } else { "Save" } }
                button { disabled: is_saving, onclick: move |_| editor.write().discard(), "Cancel" }
            }
        }
    }
}

#[cfg(target_family = "wasm")]
fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        window.alert_with_message(message).ok();
    }
}

#[cfg(not(target_family = "wasm"))]
fn alert(message: &str) {
    tracing::warn!("{message}");
}
