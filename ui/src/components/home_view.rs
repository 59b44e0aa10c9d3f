use std::time::Duration;

use dioxus::prelude::*;

use scm_common::api::CatalogueApi;
use scm_common::pagination::{ListQuery, PaginatedResponse, DEFAULT_PAGE_SIZE};
use scm_common::product::Product;
use scm_common::search::{RequestTracker, SearchState, SEARCH_DEBOUNCE};

use super::app::use_catalogue;
use super::product_card::ProductCard;

/// Listing page: search box, product grid and pagination.
#[component]
pub fn HomeView() -> Element {
    let client = use_catalogue();
    let base_url = client.base_url().to_string();

    let mut search = use_signal(SearchState::new);
    let mut tracker = use_signal(RequestTracker::new);
    let mut listing = use_signal(|| None::<PaginatedResponse<Product>>);
    let mut loading = use_signal(|| true);

    // Only the effective text and page drive requests, not every keystroke.
    let query = use_memo(move || {
        let s = search.read();
        ListQuery::new(s.page(), DEFAULT_PAGE_SIZE, s.effective())
    });

    use_effect(move || {
        let query = query();
        let ticket = tracker.write().issue();
        let client = client.clone();
        loading.set(true);
        spawn(async move {
            let result = client.list_products(&query).await;
            if !tracker.peek().is_current(ticket) {
                return;
            }
            match result {
                Ok(page) => listing.set(Some(page)),
                Err(e) => {
                    tracing::warn!("Failed to load products: {e}");
                    listing.set(None);
                }
            }
            loading.set(false);
        });
    });

    let draft = search.read().draft().to_string();
    let effective = search.read().effective().to_string();
    let is_loading = *loading.read();
    let current_listing = listing.read().clone();

    rsx! {
        div { class: "home-view",
            div { class: "search-bar",
                input {
                    r#type: "search",
                    placeholder: "Search garments by name or id",
                    value: "{draft}",
                    oninput: move |evt: FormEvent| {
                        let generation = search.write().input(evt.value());
                        spawn(async move {
                            sleep(SEARCH_DEBOUNCE).await;
                            search.write().settle(generation);
                        });
                    },
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            search.write().submit();
                        }
                    },
                }
                button {
                    onclick: move |_| {
                        search.write().submit();
                    },
                    "Search"
                }
                if !effective.is_empty() {
                    button {
                        class: "clear-search",
                        onclick: move |_| {
                            search.write().input(String::new());
                            search.write().submit();
                        },
                        "Clear"
                    }
                }
            }

            if is_loading && current_listing.is_none() {
                p { class: "loading", "Loading products..." }
            }

            match current_listing {
                Some(page) if page.data.is_empty() => rsx! {
                    p { class: "empty-state",
                        if effective.is_empty() {
                            "No products in the catalogue yet."
                        } else {
                            "No products match \"{effective}\"."
                        }
                    }
                },
                Some(page) => {
                    let current = page.page;
                    let total_pages = page.total_pages;
                    let has_more = page.has_more();
                    let is_first = page.is_first_page();
                    rsx! {
                        p { class: "result-count", "{page.total} products" }
                        div { class: "product-grid",
                            for product in page.data {
                                ProductCard {
                                    key: "{product.id}",
                                    product,
                                    base_url: base_url.clone(),
                                }
                            }
                        }
                        div { class: "pagination",
                            button {
                                disabled: is_first,
                                onclick: move |_| search.write().set_page(current.saturating_sub(1)),
                                "Previous"
                            }
                            span { "Page {current} of {total_pages}" }
                            button {
                                disabled: !has_more,
                                onclick: move |_| search.write().set_page(current + 1),
                                "Next"
                            }
                        }
                    }
                }
                None if !is_loading => rsx! {
                    p { class: "empty-state", "Products are unavailable right now." }
                },
                None => rsx! {},
            }
        }
    }
}

#[cfg(target_family = "wasm")]
async fn sleep(duration: Duration) {
    gloo_timers::future::TimeoutFuture::new(duration.as_millis() as u32).await;
}

#[cfg(not(target_family = "wasm"))]
async fn sleep(_duration: Duration) {
    std::future::pending::<()>().await; // never runs on native
}
