use dioxus::prelude::*;

use super::catalogue_client::CatalogueClient;
use super::home_view::HomeView;
use super::product_view::ProductView;
use super::tracking_view::TrackingPage;

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[layout(AppLayout)]
    #[route("/")]
    Home {},
    #[route("/product/:id")]
    Product { id: String },
    #[end_layout]
    #[route("/tracking/:id")]
    Tracking { id: String },
}

/// The catalogue client shared by every view.
pub fn use_catalogue() -> CatalogueClient {
    use_context::<CatalogueClient>()
}

#[component]
pub fn App() -> Element {
    use_context_provider(CatalogueClient::from_env);

    rsx! { Router::<Route> {} }
}

#[component]
fn AppLayout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "app-header",
                Link { to: Route::Home {}, class: "brand", "Garment SCM" }
                span { class: "tagline", "Verified garments, traced from factory to door" }
            }
            main { class: "app-main",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Home() -> Element {
    rsx! { HomeView {} }
}

#[component]
fn Product(id: String) -> Element {
    // Keyed so navigating between products resets all local view state.
    rsx! { ProductView { key: "{id}", id: id.clone() } }
}

#[component]
fn Tracking(id: String) -> Element {
    rsx! { TrackingPage { key: "{id}", id: id.clone() } }
}
