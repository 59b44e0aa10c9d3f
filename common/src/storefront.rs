//! Storefront client operations that sit on top of [`CatalogueApi`].

use crate::api::{ApiError, CatalogueApi};
use crate::pagination::ListQuery;
use crate::product::{Product, ProductId};
use crate::tracking::{TrackingEditor, TrackingStep};

/// How many similar products the detail page shows.
pub const SIMILAR_PRODUCTS_CAP: usize = 8;

/// Search phrase for "similar products": the first two words of the name
/// longer than two characters.
pub fn similar_search_phrase(name: &str) -> Option<String> {
    let words: Vec<&str> = name
        .split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .take(2)
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Products resembling `name`, excluding `current`, at most `cap` of them.
///
/// Never fails: a query error is logged and yields an empty list.
pub async fn similar_products<A: CatalogueApi>(
    api: &A,
    name: &str,
    current: &ProductId,
    cap: usize,
) -> Vec<Product> {
    let Some(phrase) = similar_search_phrase(name) else {
        return Vec::new();
    };
    if cap == 0 {
        return Vec::new();
    }

    // One extra so the cap still holds after dropping the current product.
    let query = ListQuery::new(1, cap.saturating_add(1), phrase);
    match api.list_products(&query).await {
        Ok(page) => page
            .data
            .into_iter()
            .filter(|p| &p.id != current)
            .take(cap)
            .collect(),
        Err(e) => {
            tracing::warn!("Failed to fetch similar products for {current}: {e}");
            Vec::new()
        }
    }
}

/// Send the editor's draft with one update call.
///
/// On success the editor leaves edit mode with the confirmed history. On
/// failure it stays in edit mode with the draft intact. Outside edit mode
/// this is a no-op.
pub async fn save_tracking<A: CatalogueApi>(
    api: &A,
    id: &ProductId,
    editor: &mut TrackingEditor,
) -> Result<(), ApiError> {
    let Some(draft) = editor.pending().map(<[TrackingStep]>::to_vec) else {
        return Ok(());
    };
    let updated = api.update_tracking(id, &draft).await?;
    editor.commit(&draft, updated.tracking_history);
    Ok(())
}
