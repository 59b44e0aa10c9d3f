use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use scm_common::pagination::{ListQuery, PaginatedResponse};
use scm_common::product::{Product, ProductId};
use scm_common::tracking::{TrackingUpdate, TrackingUpdated};
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::error::CatalogueError;
use crate::store::ProductStore;

pub struct AppState {
    pub store: ProductStore,
    pub config: Config,
}

impl AppState {
    pub fn new(store: ProductStore, config: Config) -> Arc<Self> {
        Arc::new(Self { store, config })
    }

    /// Resolve `page`/`limit` against the configured defaults.
    ///
    /// Zero is rejected; a `limit` above the configured maximum is clamped.
    pub fn resolve_page(&self, query: &ListQuery) -> Result<(usize, usize), CatalogueError> {
        let page = query.page.unwrap_or(1);
        if page == 0 {
            return Err(CatalogueError::InvalidQuery("page must be >= 1".into()));
        }
        let limit = match query.limit {
            Some(0) => {
                return Err(CatalogueError::InvalidQuery("limit must be >= 1".into()));
            }
            Some(limit) => limit.min(self.config.max_page_size),
            None => self.config.default_page_size,
        };
        Ok((page, limit))
    }
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
    pub products: usize,
}

pub async fn root_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        message: "Garment SCM catalogue is running".to_string(),
        products: state.store.len().await,
    })
}

pub async fn list_products_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<PaginatedResponse<Product>>, CatalogueError> {
    let Query(query) = query?;
    let (page, limit) = state.resolve_page(&query)?;
    Ok(Json(state.store.list(&query.needle(), page, limit).await))
}

pub async fn get_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, CatalogueError> {
    state.store.get(&ProductId::new(id)).await.map(Json)
}

pub async fn update_tracking_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    update: Result<Json<TrackingUpdate>, JsonRejection>,
) -> Result<Json<TrackingUpdated>, CatalogueError> {
    let Json(update) = update?;
    let id = ProductId::new(id);
    let steps = update.tracking_history.len();
    let history = state
        .store
        .update_tracking(&id, update.tracking_history)
        .await?;
    info!("Replaced tracking history of {id} ({steps} steps)");
    Ok(Json(TrackingUpdated::success(history)))
}
