//! Garment SCM storefront: product catalogue, detail pages and shipment
//! tracking, talking to the catalogue service over HTTP.

mod components;

fn main() {
    dioxus::launch(components::App);
}
