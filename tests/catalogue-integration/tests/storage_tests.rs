use std::sync::Arc;

use scm_common::api::CatalogueApi;
use scm_common::assets::{product_image_url, qr_image_url};
use scm_common::pagination::ListQuery;
use scm_common::product::ProductId;
use scm_common::tracking::TrackingStep;
use scm_integration::harness::{seed_record, shirts, TestHarness};
use serde_json::json;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn update_survives_restart() {
    let h = TestHarness::start(shirts(3)).await;
    let id = ProductId::new("2");
    let history = vec![
        TrackingStep::new("Manufactured", "2025-05-01", "Tiruppur", true),
        TrackingStep::new("In Transit", "2025-05-04", "Chennai", false),
    ];
    h.api.update_tracking(&id, &history).await.unwrap();

    let data_dir = h.stop().await;
    let h = TestHarness::start_in(data_dir).await;

    assert_eq!(h.api.get_product(&id).await.unwrap().tracking_history, history);
    assert!(h
        .api
        .get_product(&ProductId::new("1"))
        .await
        .unwrap()
        .tracking_history
        .is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn invalid_seed_records_are_never_served() {
    let mut bad_confidence = seed_record("2", "Bad Confidence", 100.0);
    bad_confidence["pred_proba"] = json!(1.7);
    let mut negative_price = seed_record("3", "Negative Price", -5.0);
    negative_price["price"] = json!(-5.0);
    let duplicate = seed_record("1", "Duplicate Kurta", 100.0);

    let h = TestHarness::start(vec![
        seed_record("1", "Blue Kurta", 799.0),
        bad_confidence,
        negative_price,
        duplicate,
        json!({"name": "No id at all"}),
    ])
    .await;

    let all = h
        .api
        .list_products(&ListQuery::new(1, 100, ""))
        .await
        .unwrap();
    assert_eq!(all.total, 1);
    assert_eq!(all.data[0].name, "Blue Kurta");
    assert!(h.api.get_product(&ProductId::new("2")).await.is_err());
    assert!(h.api.get_product(&ProductId::new("3")).await.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn rejected_records_are_kept_in_place_after_update() {
    let mut bad = seed_record("2", "Bad Confidence", 100.0);
    bad["pred_proba"] = json!(-0.5);
    let h = TestHarness::start(vec![
        seed_record("1", "Blue Kurta", 799.0),
        bad.clone(),
        seed_record("3", "Red Saree", 1299.0),
    ])
    .await;

    h.api
        .update_tracking(
            &ProductId::new("1"),
            &[TrackingStep::new("Shipped", "2025-06-01", "Hub1", true)],
        )
        .await
        .unwrap();

    let on_disk: Vec<serde_json::Value> =
        serde_json::from_slice(&std::fs::read(h.metadata_path()).unwrap()).unwrap();
    assert_eq!(on_disk.len(), 3);
    assert_eq!(on_disk[0]["tracking_history"][0]["status"], "Shipped");
    assert_eq!(on_disk[1], bad);
    assert_eq!(on_disk[2]["id"], "3");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn static_assets_are_served_from_data_dir() {
    let h = TestHarness::start(vec![seed_record("7", "Green Jacket", 2499.0)]).await;
    h.write_asset("images/7.jpg", b"jpeg bytes");
    let product = h.api.get_product(&ProductId::new("7")).await.unwrap();

    let image = product_image_url(h.api.base_url(), &product).unwrap();
    let resp = reqwest::get(&image).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.bytes().await.unwrap().as_ref(), b"jpeg bytes");

    // qr/7.png was never written
    let qr = qr_image_url(h.api.base_url(), &product).unwrap();
    assert_eq!(
        reqwest::get(&qr).await.unwrap().status(),
        reqwest::StatusCode::NOT_FOUND
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn readers_see_whole_histories_during_updates() {
    let h = Arc::new(TestHarness::start(shirts(2)).await);
    let id = ProductId::new("1");
    let long: Vec<TrackingStep> = (0..20)
        .map(|i| TrackingStep::new(format!("Step {i}"), "2025-01-01", "Hub", i % 2 == 0))
        .collect();

    let writer = {
        let h = h.clone();
        let id = id.clone();
        let long = long.clone();
        tokio::spawn(async move {
            for round in 0..20 {
                let next: &[TrackingStep] = if round % 2 == 0 { &long } else { &[] };
                h.api.update_tracking(&id, next).await.unwrap();
            }
        })
    };

    let reader = {
        let h = h.clone();
        let id = id.clone();
        let long = long.clone();
        tokio::spawn(async move {
            for _ in 0..40 {
                let history = h.api.get_product(&id).await.unwrap().tracking_history;
                assert!(history.is_empty() || history == long);
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();
}
