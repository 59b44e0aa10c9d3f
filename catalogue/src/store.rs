//! Product catalogue storage.
//!
//! Readers see an immutable [`Catalogue`] snapshot shared through an `Arc`.
//! Writers are serialised, build the next snapshot off to the side, persist
//! it, and only then swap it in, so a reader observes either the old or the
//! new state in full.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use scm_common::pagination::{paginate, PaginatedResponse};
use scm_common::product::{Product, ProductId};
use scm_common::tracking::TrackingStep;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::error::CatalogueError;

/// One immutable view of every servable product, in seed-file order.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
    /// Every seed record as read, rejected ones included, so a save keeps
    /// the file's order and fields.
    records: Vec<Value>,
    /// Position in `records` of each entry of `products`.
    slots: Vec<usize>,
}

impl Catalogue {
    /// Build a catalogue from raw seed records, skipping anything malformed,
    /// invalid or duplicated.
    pub fn from_records(records: Vec<Value>) -> Self {
        let mut catalogue = Catalogue::default();
        for (slot, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Product>(record.clone()) {
                Ok(product) => {
                    if let Err(e) = product.validate() {
                        warn!("Skipping product {}: {e}", product.id);
                    } else if catalogue.index.contains_key(&product.id) {
                        warn!("Skipping duplicate product id {}", product.id);
                    } else {
                        catalogue.push(product, slot);
                    }
                }
                Err(e) => warn!("Skipping malformed product record: {e}"),
            }
            catalogue.records.push(record);
        }
        catalogue
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        let records = products
            .into_iter()
            .filter_map(|p| serde_json::to_value(p).ok())
            .collect();
        Self::from_records(records)
    }

    fn push(&mut self, product: Product, slot: usize) {
        self.index.insert(product.id.clone(), self.products.len());
        self.products.push(product);
        self.slots.push(slot);
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn rejected_count(&self) -> usize {
        self.records.len() - self.products.len()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&idx| &self.products[idx])
    }

    pub(crate) fn get_mut(&mut self, id: &ProductId) -> Option<&mut Product> {
        let idx = *self.index.get(id)?;
        self.products.get_mut(idx)
    }

    /// Filter by a lowercased needle and slice out one page.
    pub fn search(&self, needle: &str, page: usize, limit: usize) -> PaginatedResponse<Product> {
        let hits: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.matches_search(needle))
            .collect();
        paginate(&hits, page, limit).map(Product::clone)
    }

    /// The seed records with each product's current fields written back
    /// into its own record. The stored `id` and unchanged fields keep their
    /// original JSON form.
    fn to_records(&self) -> Result<Vec<Value>, CatalogueError> {
        let mut records = self.records.clone();
        for (product, &slot) in self.products.iter().zip(&self.slots) {
            let Value::Object(fields) = serde_json::to_value(product)? else {
                continue;
            };
            match records.get_mut(slot) {
                Some(Value::Object(raw)) => {
                    for (key, value) in fields {
                        if key != "id" && !same_field(raw.get(&key), &value) {
                            raw.insert(key, value);
                        }
                    }
                }
                Some(other) => *other = Value::Object(fields),
                None => {}
            }
        }
        Ok(records)
    }
}

/// Whether `written` says the same thing as the seed's `raw` value.
fn same_field(raw: Option<&Value>, written: &Value) -> bool {
    match (raw, written) {
        (None | Some(Value::Null), Value::Null) => true,
        (None | Some(Value::Null), Value::Array(items)) => items.is_empty(),
        (None, Value::String(text)) => text.is_empty(),
        (Some(Value::Number(a)), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Some(raw), written) => raw == written,
        (None, _) => false,
    }
}

pub struct ProductStore {
    snapshot: RwLock<Arc<Catalogue>>,
    writer: Mutex<()>,
    metadata_path: Option<PathBuf>,
}

impl ProductStore {
    /// A store that lives only in memory; updates are not persisted.
    pub fn in_memory(products: Vec<Product>) -> Self {
        Self::with_catalogue(Catalogue::from_products(products), None)
    }

    /// Load the metadata file. A missing file starts an empty catalogue.
    pub async fn open(metadata_path: impl Into<PathBuf>) -> Result<Self, CatalogueError> {
        let path = metadata_path.into();
        let catalogue = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let records: Vec<Value> = serde_json::from_slice(&bytes)?;
                Catalogue::from_records(records)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Metadata file {} not found; starting empty", path.display());
                Catalogue::default()
            }
            Err(e) => return Err(e.into()),
        };
        info!(
            "Loaded {} products from {} ({} skipped)",
            catalogue.len(),
            path.display(),
            catalogue.rejected_count()
        );
        Ok(Self::with_catalogue(catalogue, Some(path)))
    }

    fn with_catalogue(catalogue: Catalogue, metadata_path: Option<PathBuf>) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(catalogue)),
            writer: Mutex::new(()),
            metadata_path,
        }
    }

    /// The current catalogue. Holding it never blocks writers.
    pub async fn snapshot(&self) -> Arc<Catalogue> {
        self.snapshot.read().await.clone()
    }

    pub async fn list(
        &self,
        needle: &str,
        page: usize,
        limit: usize,
    ) -> PaginatedResponse<Product> {
        self.snapshot().await.search(needle, page, limit)
    }

    pub async fn get(&self, id: &ProductId) -> Result<Product, CatalogueError> {
        self.snapshot()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogueError::NotFound(id.clone()))
    }

    /// Replace a product's whole tracking history. Last writer wins.
    pub async fn update_tracking(
        &self,
        id: &ProductId,
        tracking_history: Vec<TrackingStep>,
    ) -> Result<Vec<TrackingStep>, CatalogueError> {
        self.modify(|catalogue| {
            let product = catalogue
                .get_mut(id)
                .ok_or_else(|| CatalogueError::NotFound(id.clone()))?;
            product.tracking_history = tracking_history;
            Ok(product.tracking_history.clone())
        })
        .await
    }

    /// Apply `change` to a copy of the current catalogue, persist it, then
    /// publish it. If `change` or the write fails, nothing is published.
    pub(crate) async fn modify<R>(
        &self,
        change: impl FnOnce(&mut Catalogue) -> Result<R, CatalogueError>,
    ) -> Result<R, CatalogueError> {
        let _writer = self.writer.lock().await;
        let mut next = Catalogue::clone(&*self.snapshot().await);
        let result = change(&mut next)?;

        if let Some(path) = self.metadata_path.clone() {
            let records = next.to_records()?;
            tokio::task::spawn_blocking(move || write_atomically(&path, &records))
                .await
                .map_err(std::io::Error::other)??;
        }

        *self.snapshot.write().await = Arc::new(next);
        Ok(result)
    }

    pub async fn len(&self) -> usize {
        self.snapshot().await.len()
    }

    pub fn metadata_path(&self) -> Option<&Path> {
        self.metadata_path.as_deref()
    }
}

/// Write the records next to `path` and rename over it.
fn write_atomically(path: &Path, records: &[Value]) -> Result<(), CatalogueError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let bytes = serde_json::to_vec_pretty(records)?;
    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(&bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    debug!("Persisted {} records to {}", records.len(), path.display());
    Ok(())
}
