use crate::pagination::{ListQuery, PaginatedResponse};
use crate::product::{Product, ProductId};
use crate::tracking::{TrackingStep, TrackingUpdated};

/// Errors a storefront client can see when talking to the catalogue service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("product {0} not found")]
    NotFound(ProductId),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

/// The catalogue operations the storefront depends on.
///
/// Implemented over browser `fetch` in the UI and over reqwest in the
/// integration harness; tests can supply an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait CatalogueApi {
    /// One page of products, optionally filtered by `query.search`.
    async fn list_products(&self, query: &ListQuery)
        -> Result<PaginatedResponse<Product>, ApiError>;

    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError>;

    /// Replace a product's whole tracking history.
    async fn update_tracking(
        &self,
        id: &ProductId,
        tracking_history: &[TrackingStep],
    ) -> Result<TrackingUpdated, ApiError>;
}
