use scm_common::api::{ApiError, CatalogueApi};
use scm_common::pagination::ListQuery;
use scm_integration::harness::{shirts, TestHarness};

/// Every (page, limit) combination returns the right slice length and page count.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn page_sizes_follow_formula() {
    let total = 23usize;
    let h = TestHarness::start(shirts(total)).await;

    for limit in [1usize, 5, 7, 12, 23, 40] {
        for page in 1..=6usize {
            let resp = h
                .api
                .list_products(&ListQuery::new(page, limit, ""))
                .await
                .unwrap();
            let expected = limit.min(total.saturating_sub((page - 1) * limit));
            assert_eq!(resp.data.len(), expected, "page {page} limit {limit}");
            assert_eq!(resp.total, total);
            assert_eq!(resp.total_pages, total.div_ceil(limit));
            assert_eq!(resp.page, page);
            assert_eq!(resp.limit, limit);
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn pages_walk_the_catalogue_in_order() {
    let h = TestHarness::start(shirts(10)).await;
    let mut seen = Vec::new();
    for page in 1..=4 {
        let resp = h
            .api
            .list_products(&ListQuery::new(page, 3, ""))
            .await
            .unwrap();
        seen.extend(resp.data.into_iter().map(|p| p.id.0));
    }
    let expected: Vec<String> = (1..=10).map(|i| i.to_string()).collect();
    assert_eq!(seen, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn defaults_apply_when_params_are_omitted() {
    let h = TestHarness::start(shirts(30)).await;
    let resp = h.api.list_products(&ListQuery::default()).await.unwrap();
    assert_eq!(resp.page, 1);
    assert_eq!(resp.limit, 12);
    assert_eq!(resp.data.len(), 12);
    assert_eq!(resp.total_pages, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn search_is_case_insensitive_and_idempotent() {
    let h = TestHarness::start(shirts(15)).await;
    let first = h
        .api
        .list_products(&ListQuery::new(1, 50, "SHIRT 1"))
        .await
        .unwrap();
    let again = h
        .api
        .list_products(&ListQuery::new(1, 50, "shirt 1"))
        .await
        .unwrap();
    // 1 and 10..=15
    assert_eq!(first.total, 7);
    assert_eq!(first, again);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn out_of_range_page_is_empty() {
    let h = TestHarness::start(shirts(5)).await;
    let resp = h
        .api
        .list_products(&ListQuery::new(9, 2, ""))
        .await
        .unwrap();
    assert!(resp.data.is_empty());
    assert_eq!(resp.total, 5);
    assert_eq!(resp.total_pages, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn zero_page_is_bad_request() {
    let h = TestHarness::start(shirts(5)).await;
    let err = h
        .api
        .list_products(&ListQuery::new(0, 2, ""))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 400, .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn oversized_limit_is_clamped() {
    let h = TestHarness::start(shirts(120)).await;
    let resp = h
        .api
        .list_products(&ListQuery::new(1, 10_000, ""))
        .await
        .unwrap();
    assert_eq!(resp.limit, 100);
    assert_eq!(resp.data.len(), 100);
    assert_eq!(resp.total_pages, 2);
}
