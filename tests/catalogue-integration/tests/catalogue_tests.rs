use scm_common::api::{ApiError, CatalogueApi};
use scm_common::pagination::ListQuery;
use scm_common::product::ProductId;
use scm_common::storefront::{save_tracking, similar_products, SIMILAR_PRODUCTS_CAP};
use scm_common::tracking::{StepField, TrackingEditor, TrackingStep};
use scm_integration::harness::{seed_record, shirts, TestHarness};
use serde_json::Value;

fn shipped() -> Vec<TrackingStep> {
    vec![TrackingStep::new("Shipped", "2025-06-01", "Hub1", true)]
}

/// Seed one kurta, find it, look it up, replace its history, read it back.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blue_kurta_round_trip() {
    let h = TestHarness::start(vec![
        seed_record("1001", "Blue Kurta", 799.0),
        seed_record("1002", "Red Saree", 1499.0),
    ])
    .await;
    let id = ProductId::new("1001");

    let found = h
        .api
        .list_products(&ListQuery::new(1, 12, "kurta"))
        .await
        .unwrap();
    assert_eq!(found.total, 1);
    assert_eq!(found.data[0].id, id);

    let product = h.api.get_product(&id).await.unwrap();
    assert_eq!(product.name, "Blue Kurta");
    assert!(product.tracking_history.is_empty());

    let updated = h.api.update_tracking(&id, &shipped()).await.unwrap();
    assert_eq!(updated.status, "success");
    assert_eq!(updated.tracking_history, shipped());

    let product = h.api.get_product(&id).await.unwrap();
    assert_eq!(product.tracking_history, shipped());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn empty_history_is_a_valid_replacement() {
    let h = TestHarness::start(shirts(2)).await;
    let id = ProductId::new("2");

    h.api.update_tracking(&id, &shipped()).await.unwrap();
    h.api.update_tracking(&id, &[]).await.unwrap();

    assert!(h.api.get_product(&id).await.unwrap().tracking_history.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unknown_id_is_not_found_for_get_and_update() {
    let h = TestHarness::start(shirts(3)).await;
    let missing = ProductId::new("999");

    assert_eq!(
        h.api.get_product(&missing).await.unwrap_err(),
        ApiError::NotFound(missing.clone())
    );
    assert!(h
        .api
        .update_tracking(&missing, &shipped())
        .await
        .unwrap_err()
        .is_not_found());

    for i in 1..=3 {
        let product = h.api.get_product(&ProductId::new(i.to_string())).await.unwrap();
        assert!(product.tracking_history.is_empty());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn not_found_body_is_json_error() {
    let h = TestHarness::start(shirts(1)).await;
    let resp = reqwest::get(h.api.url("/api/products/nope")).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("nope"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unparsable_page_is_json_bad_request() {
    let h = TestHarness::start(shirts(3)).await;
    let resp = reqwest::get(h.api.url("/api/products?page=abc")).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(resp.headers()["content-type"], "application/json");
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("page"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn malformed_tracking_body_is_json_bad_request() {
    let h = TestHarness::start(shirts(1)).await;
    let resp = h
        .api
        .client()
        .put(h.api.url("/api/products/1/tracking"))
        .header("content-type", "application/json")
        .body(r#"{"tracking_history": "soon"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(resp.headers()["content-type"], "application/json");
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());

    let stored = h.api.get_product(&ProductId::new("1")).await.unwrap();
    assert!(stored.tracking_history.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn ids_with_reserved_characters_round_trip() {
    let h = TestHarness::start(vec![
        seed_record("SKU 1/2", "Linen Shirt", 999.0),
        seed_record("SKU 1", "Cotton Shirt", 499.0),
    ])
    .await;
    let id = ProductId::new("SKU 1/2");

    let product = h.api.get_product(&id).await.unwrap();
    assert_eq!(product.name, "Linen Shirt");

    let updated = h.api.update_tracking(&id, &shipped()).await.unwrap();
    assert_eq!(updated.tracking_history, shipped());
    let neighbour = h.api.get_product(&ProductId::new("SKU 1")).await.unwrap();
    assert!(neighbour.tracking_history.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn root_reports_status() {
    let h = TestHarness::start(shirts(5)).await;
    let body: Value = reqwest::get(h.api.url("/"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["products"], 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn similar_products_over_http() {
    let records = (1..=12)
        .map(|i| seed_record(&i.to_string(), &format!("Nike Air Max {}", 80 + i), 2999.0))
        .chain([seed_record("50", "Blue Kurta", 799.0)])
        .collect();
    let h = TestHarness::start(records).await;
    let current = ProductId::new("5");

    let similar = similar_products(&h.api, "Nike Air Max 90", &current, SIMILAR_PRODUCTS_CAP).await;
    assert_eq!(similar.len(), SIMILAR_PRODUCTS_CAP);
    assert!(similar.iter().all(|p| p.id != current));
    assert!(similar.iter().all(|p| p.name.starts_with("Nike Air")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn editor_save_sends_one_full_replacement() {
    let h = TestHarness::start(shirts(1)).await;
    let id = ProductId::new("1");
    let product = h.api.get_product(&id).await.unwrap();

    let mut editor = TrackingEditor::new(product.tracking_history);
    editor.begin();
    let today = chrono::Utc::now().date_naive();
    editor.append(today);
    editor.append(today);
    editor.edit(0, StepField::Status("Manufactured".into()));
    editor.edit(0, StepField::Completed(true));
    editor.remove(1);

    save_tracking(&h.api, &id, &mut editor).await.unwrap();
    assert!(!editor.is_editing());

    let stored = h.api.get_product(&id).await.unwrap().tracking_history;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, "Manufactured");
    assert!(stored[0].completed);
    assert_eq!(stored, editor.saved());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unsupported_method_is_rejected() {
    let h = TestHarness::start(shirts(1)).await;
    let resp = h
        .api
        .client()
        .post(h.api.url("/api/products/1/tracking"))
        .json(&serde_json::json!({"tracking_history": []}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
}
