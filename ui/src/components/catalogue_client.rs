//! Browser `fetch` client for the catalogue service.
//!
//! The API base URL comes from the compile-time `SCM_API_URL` variable when
//! set, otherwise from the page's own origin.

use serde::de::DeserializeOwned;

use scm_common::api::{ApiError, CatalogueApi};
use scm_common::pagination::{ListQuery, PaginatedResponse};
use scm_common::product::{Product, ProductId};
use scm_common::tracking::{TrackingStep, TrackingUpdate, TrackingUpdated};

pub fn api_base_url() -> String {
    if let Some(url) = option_env!("SCM_API_URL") {
        if !url.is_empty() {
            return url.trim_end_matches('/').to_string();
        }
    }
    window_origin().unwrap_or_default()
}

#[cfg(target_family = "wasm")]
fn window_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(not(target_family = "wasm"))]
fn window_origin() -> Option<String> {
    None
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatalogueClient {
    base_url: String,
}

impl CatalogueClient {
    pub fn from_env() -> Self {
        Self {
            base_url: api_base_url(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn parse<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Map a non-2xx reply; 404 on a product route becomes `NotFound`.
fn check(status: u16, body: String, id: Option<&ProductId>) -> Result<String, ApiError> {
    match (status, id) {
        (200..=299, _) => Ok(body),
        (404, Some(id)) => Err(ApiError::NotFound(id.clone())),
        _ => Err(ApiError::Http { status, body }),
    }
}

impl CatalogueApi for CatalogueClient {
    async fn list_products(
        &self,
        query: &ListQuery,
    ) -> Result<PaginatedResponse<Product>, ApiError> {
        let url = format!("{}/api/products?{}", self.base_url, query_string(query));
        let (status, body) = fetch_text(&url, "GET", None).await?;
        parse(&check(status, body, None)?)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let url = format!("{}/api/products/{}", self.base_url, encode_segment(id.as_str()));
        let (status, body) = fetch_text(&url, "GET", None).await?;
        parse(&check(status, body, Some(id))?)
    }

    async fn update_tracking(
        &self,
        id: &ProductId,
        tracking_history: &[TrackingStep],
    ) -> Result<TrackingUpdated, ApiError> {
        let url = format!(
            "{}/api/products/{}/tracking",
            self.base_url,
            encode_segment(id.as_str())
        );
        let body = serde_json::to_string(&TrackingUpdate {
            tracking_history: tracking_history.to_vec(),
        })
        .map_err(|e| ApiError::Decode(e.to_string()))?;
        let (status, body) = fetch_text(&url, "PUT", Some(body)).await?;
        parse(&check(status, body, Some(id))?)
    }
}

#[cfg(target_family = "wasm")]
fn query_string(query: &ListQuery) -> String {
    let Ok(params) = web_sys::UrlSearchParams::new() else {
        return String::new();
    };
    if let Some(page) = query.page {
        params.append("page", &page.to_string());
    }
    if let Some(limit) = query.limit {
        params.append("limit", &limit.to_string());
    }
    params.append("search", &query.search);
    params.to_string().into()
}

#[cfg(target_family = "wasm")]
fn encode_segment(segment: &str) -> String {
    js_sys::encode_uri_component(segment).into()
}

#[cfg(target_family = "wasm")]
async fn fetch_text(
    url: &str,
    method: &str,
    body: Option<String>,
) -> Result<(u16, String), ApiError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let transport = |what: &str, e: wasm_bindgen::JsValue| {
        ApiError::Transport(format!("{what}: {e:?}"))
    };

    let opts = web_sys::RequestInit::new();
    opts.set_method(method);
    opts.set_mode(web_sys::RequestMode::Cors);
    let has_body = body.is_some();
    if let Some(b) = body {
        opts.set_body(&wasm_bindgen::JsValue::from_str(&b));
    }

    let request = web_sys::Request::new_with_str_and_init(url, &opts)
        .map_err(|e| transport("Failed to create request", e))?;
    if has_body {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| transport("Failed to set header", e))?;
    }

    let window = web_sys::window().ok_or_else(|| ApiError::Transport("No window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| transport("Fetch failed", e))?;
    let resp: web_sys::Response = resp_value
        .dyn_into()
        .map_err(|_| ApiError::Transport("Response is not a Response object".into()))?;

    let text = JsFuture::from(resp.text().map_err(|e| transport("Failed to get text", e))?)
        .await
        .map_err(|e| transport("Failed to read body", e))?;
    let text = text
        .as_string()
        .ok_or_else(|| ApiError::Decode("Response body is not a string".into()))?;

    Ok((resp.status(), text))
}

// Non-WASM stubs for type checking
#[cfg(not(target_family = "wasm"))]
fn query_string(_query: &ListQuery) -> String {
    String::new()
}

#[cfg(not(target_family = "wasm"))]
fn encode_segment(segment: &str) -> String {
    segment.to_string()
}

#[cfg(not(target_family = "wasm"))]
async fn fetch_text(
    _url: &str,
    _method: &str,
    _body: Option<String>,
) -> Result<(u16, String), ApiError> {
    Err(ApiError::Transport(
        "Catalogue client only available in WASM".to_string(),
    ))
}
