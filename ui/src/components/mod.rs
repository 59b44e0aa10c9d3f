pub mod app;
pub mod catalogue_client;
pub mod home_view;
pub mod product_card;
pub mod product_view;
pub mod similar_products;
pub mod tracking_view;

pub use app::App;
