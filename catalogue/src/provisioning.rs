//! Offline provisioning of per-product tracking links and QR images.

use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};
use scm_common::product::ProductId;
use tracing::{debug, info};

use crate::error::CatalogueError;
use crate::store::ProductStore;

/// Pixels per QR module.
pub const QR_MODULE_PIXELS: u32 = 6;
/// Light modules around the symbol.
pub const QR_BORDER_MODULES: u32 = 2;

/// Relative location of a product's QR image under the data root.
pub fn qr_file_for(id: &ProductId) -> String {
    format!("qr/{id}.png")
}

/// Public tracking page of a product on the storefront at `frontend_url`.
pub fn tracking_url_for(frontend_url: &str, id: &ProductId) -> String {
    format!("{}/tracking/{id}", frontend_url.trim_end_matches('/'))
}

/// Render `data` as a black-on-white QR code (error correction level M).
pub fn render_qr(data: &str) -> Result<GrayImage, CatalogueError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)?;
    let modules = code.width() as u32;
    let side = (modules + 2 * QR_BORDER_MODULES) * QR_MODULE_PIXELS;

    Ok(GrayImage::from_fn(side, side, |x, y| {
        let mx = (x / QR_MODULE_PIXELS) as i64 - QR_BORDER_MODULES as i64;
        let my = (y / QR_MODULE_PIXELS) as i64 - QR_BORDER_MODULES as i64;
        let inside = (0..modules as i64).contains(&mx) && (0..modules as i64).contains(&my);
        if inside && code[(mx as usize, my as usize)] == Color::Dark {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    }))
}

/// Write a PNG QR image for every `(relative path, url)` pair under `data_dir`.
fn write_qr_images(data_dir: &Path, jobs: &[(String, String)]) -> Result<(), CatalogueError> {
    std::fs::create_dir_all(data_dir.join("qr"))?;
    for (qr_file, url) in jobs {
        let path: PathBuf = data_dir.join(qr_file);
        render_qr(url)?.save_with_format(&path, ImageFormat::Png)?;
        debug!("Wrote QR image {}", path.display());
    }
    Ok(())
}

/// Point every product's `tracking_url` at the storefront, render its QR
/// image under `data_dir/qr/` and record the image path. Returns how many
/// products were updated.
pub async fn assign_tracking_links(
    store: &ProductStore,
    data_dir: &Path,
    frontend_url: &str,
) -> Result<usize, CatalogueError> {
    let jobs: Vec<(String, String)> = store
        .snapshot()
        .await
        .products()
        .iter()
        .map(|p| (qr_file_for(&p.id), tracking_url_for(frontend_url, &p.id)))
        .collect();

    let dir = data_dir.to_path_buf();
    tokio::task::spawn_blocking(move || write_qr_images(&dir, &jobs))
        .await
        .map_err(std::io::Error::other)??;

    let updated = store
        .modify(|catalogue| {
            let ids: Vec<ProductId> = catalogue.products().iter().map(|p| p.id.clone()).collect();
            for id in &ids {
                if let Some(product) = catalogue.get_mut(id) {
                    product.tracking_url = Some(tracking_url_for(frontend_url, id));
                    product.qr_file = Some(qr_file_for(id));
                }
            }
            Ok(ids.len())
        })
        .await?;

    info!("Assigned tracking links and QR images to {updated} products");
    Ok(updated)
}
