use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use scm_common::api::{ApiError, CatalogueApi};
use scm_common::pagination::{ListQuery, PaginatedResponse};
use scm_common::product::{Product, ProductId};
use scm_common::tracking::{TrackingStep, TrackingUpdate, TrackingUpdated};


/// Native HTTP client for the catalogue service.
#[derive(Clone)]
pub struct HttpCatalogue {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCatalogue {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// `/api/products/{id}` followed by `tail`, with every segment
    /// percent-encoded.
    pub fn product_url(&self, id: &ProductId, tail: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ApiError::Transport(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("{} cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "products", id.as_str()])
            .extend(tail);
        Ok(url)
    }
}

async fn decode<T: DeserializeOwned>(
    resp: reqwest::Response,
    id: Option<&ProductId>,
) -> Result<T, ApiError> {
    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return Err(ApiError::NotFound(id.clone()));
        }
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Http {
            status: status.as_u16(),
            body,
        });
    }
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

impl CatalogueApi for HttpCatalogue {
    async fn list_products(
        &self,
        query: &ListQuery,
    ) -> Result<PaginatedResponse<Product>, ApiError> {
        let resp = self
            .client
            .get(self.url("/api/products"))
            .query(query)
            .send()
            .await
            .map_err(transport)?;
        decode(resp, None).await
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let resp = self
            .client
            .get(self.product_url(id, &[])?)
            .send()
            .await
            .map_err(transport)?;
        decode(resp, Some(id)).await
    }

    async fn update_tracking(
        &self,
        id: &ProductId,
        tracking_history: &[TrackingStep],
    ) -> Result<TrackingUpdated, ApiError> {
        let body = TrackingUpdate {
            tracking_history: tracking_history.to_vec(),
        };
        let resp = self
            .client
            .put(self.product_url(id, &["tracking"])?)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        decode(resp, Some(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_urls_encode_the_id() {
        let api = HttpCatalogue::new("http://127.0.0.1:8000/");
        let id = ProductId::new("SKU 1/2#a");
        assert_eq!(
            api.product_url(&id, &[]).unwrap().as_str(),
            "http://127.0.0.1:8000/api/products/SKU%201%2F2%23a"
        );
        assert_eq!(
            api.product_url(&id, &["tracking"]).unwrap().as_str(),
            "http://127.0.0.1:8000/api/products/SKU%201%2F2%23a/tracking"
        );
    }
}
