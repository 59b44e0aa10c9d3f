pub mod api;
pub mod assets;
pub mod display;
pub mod pagination;
pub mod product;
pub mod search;
pub mod storefront;
pub mod tracking;
