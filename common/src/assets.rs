//! Static-asset URL construction for product images and QR codes.

use crate::product::Product;

/// Public prefix the catalogue service mounts its data directory under.
pub const STATIC_PREFIX: &str = "/static/";

const DATA_DIR_PREFIX: &str = "backend/data/";
const UPLOADS_PREFIX: &str = "uploads/";
const PLACEHOLDER_SERVICE: &str = "https://picsum.photos/seed";

/// Normalise a stored relative path so it resolves under [`STATIC_PREFIX`].
pub fn clean_asset_path(path: &str) -> &str {
    let path = path.trim_start_matches('/');
    let path = path.strip_prefix(DATA_DIR_PREFIX).unwrap_or(path);
    path.strip_prefix(UPLOADS_PREFIX).unwrap_or(path)
}

/// Resolve an `image_file`/`qr_file` value against the API base URL.
///
/// Absolute URLs pass through untouched; empty paths resolve to nothing.
pub fn asset_url(base_url: &str, path: Option<&str>) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }
    let clean = clean_asset_path(path);
    if clean.is_empty() {
        return None;
    }
    Some(format!(
        "{}{}{}",
        base_url.trim_end_matches('/'),
        STATIC_PREFIX,
        clean
    ))
}

pub fn product_image_url(base_url: &str, product: &Product) -> Option<String> {
    asset_url(base_url, product.image_file.as_deref())
}

pub fn qr_image_url(base_url: &str, product: &Product) -> Option<String> {
    asset_url(base_url, product.qr_file.as_deref())
}

/// What the storefront shows where a product's QR code goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrDisplay {
    Image(String),
    /// No `qr_file`, or the image failed to load.
    Unavailable,
}

pub fn qr_display(base_url: &str, product: &Product, load_failed: bool) -> QrDisplay {
    match qr_image_url(base_url, product) {
        Some(url) if !load_failed => QrDisplay::Image(url),
        _ => QrDisplay::Unavailable,
    }
}

/// Deterministic stand-in image for a product without one.
pub fn placeholder_image_url(product_id: &str, size: u32) -> String {
    format!("{PLACEHOLDER_SERVICE}/{product_id}/{size}/{size}")
}
