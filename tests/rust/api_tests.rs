use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use rstest::rstest;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use catalog_search::api::handlers::AppState;
use catalog_search::api::routes::catalog_router;
use catalog_search::core::config::AppConfig;
use catalog_search::core::errors::ScorerError;

use crate::support::{product_doc, with_fields, FakeStore, StubScorer};

fn router(store: Arc<FakeStore>, scorer: Arc<StubScorer>) -> Router {
    let config = AppConfig::default();
    let state = AppState::new(store, scorer, &config);
    catalog_router(state, &config.server.cors_origins)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn shirts() -> Arc<FakeStore> {
    FakeStore::with_documents(vec![
        product_doc(1, "Red Shirt", "Men", 4.5),
        product_doc(2, "Blue Shirt", "Men", 4.0),
    ])
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = get(router(shirts(), StubScorer::scores(vec![])), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn semantic_search_returns_ranked_products_with_scores() {
    let app = router(shirts(), StubScorer::scores(vec![0.9, 0.95]));

    let (status, body) = get(app, "/product_semantic_search?query=shirt&top_k=1").await;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().expect("array");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["product_id"], 2);
    assert_eq!(results[0]["name"], "Blue Shirt");
    assert!(results[0]["score"].as_f64().expect("score") > 0.94);
}

#[tokio::test]
async fn semantic_search_accepts_q_alias_and_default_top_k() {
    let app = router(shirts(), StubScorer::scores(vec![0.1, 0.2]));

    let (status, body) = get(app, "/product_semantic_search?q=shirt").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("array").len(), 2);
}

#[tokio::test]
async fn semantic_search_rejects_non_positive_top_k() {
    let scorer = StubScorer::scores(vec![0.1, 0.2]);
    let store = shirts();
    let app = router(store.clone(), scorer.clone());

    let (status, body) = get(app, "/product_semantic_search?query=shirt&top_k=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["stage"], "request");
    assert_eq!(store.call_count(), 0);
    assert_eq!(scorer.call_count(), 0);
}

#[tokio::test]
async fn semantic_search_on_empty_catalog_is_not_found() {
    let app = router(FakeStore::with_documents(vec![]), StubScorer::scores(vec![]));
    let (status, body) = get(app, "/product_semantic_search?query=shirt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["stage"], "catalog");
}

#[tokio::test]
async fn scorer_and_store_failures_are_distinguishable() {
    let scorer_down = router(
        shirts(),
        StubScorer::failing(|| ScorerError::Status {
            status: 500,
            body: "boom".to_string(),
        }),
    );
    let (status, body) = get(scorer_down, "/product_semantic_search?query=shirt").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["stage"], "scorer");

    let store_down = router(FakeStore::unavailable(), StubScorer::scores(vec![]));
    let (status, body) = get(store_down, "/product_semantic_search?query=shirt").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["stage"], "store");
}

#[tokio::test]
async fn schema_mismatch_is_server_error() {
    let mut broken = product_doc(3, "Green Shirt", "Men", 4.0);
    broken.body.as_object_mut().expect("object").remove("ratings");
    let app = router(
        FakeStore::with_documents(vec![broken]),
        StubScorer::scores(vec![0.5]),
    );

    let (status, body) = get(app, "/product_semantic_search?query=shirt").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["stage"], "mapper");
}

#[tokio::test]
async fn recommendations_return_category_mapping() {
    let store = FakeStore::with_documents(vec![
        product_doc(1, "a", "Men", 3.0),
        product_doc(2, "b", "Women", 4.0),
        product_doc(3, "c", "Men", 5.0),
        with_fields(product_doc(4, "d", "Girls", 5.0), json!({"stock": 0})),
    ]);
    let app = router(store, StubScorer::scores(vec![]));

    let (status, body) = get(app, "/recommendations?top_n=1").await;

    assert_eq!(status, StatusCode::OK);
    let mapping = body.as_object().expect("object");
    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping["Men"].as_array().expect("men").len(), 1);
    assert_eq!(mapping["Men"][0]["product_id"], 3);
    assert_eq!(mapping["Women"][0]["product_id"], 2);
}

#[tokio::test]
async fn product_lookup_hits_and_misses() {
    let (status, body) = get(router(shirts(), StubScorer::scores(vec![])), "/products/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Blue Shirt");
    assert_eq!(body["discount_price"], 15.0);

    let (status, _) = get(router(shirts(), StubScorer::scores(vec![])), "/products/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn category_listing_filters_by_main_category() {
    let store = FakeStore::with_documents(vec![
        product_doc(1, "a", "Men", 3.0),
        product_doc(2, "b", "Women", 4.0),
        product_doc(3, "c", "Men", 5.0),
    ]);
    let app = router(store.clone(), StubScorer::scores(vec![]));

    let (status, body) = get(app, "/categories/Men/products?limit=5").await;

    assert_eq!(status, StatusCode::OK);
    let ids = body
        .as_array()
        .expect("array")
        .iter()
        .map(|p| p["product_id"].as_i64().expect("id"))
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(store.last_query().expect("query").limit, 5);
}

#[tokio::test]
async fn sale_listing_skips_products_without_discount() {
    let store = FakeStore::with_documents(vec![
        product_doc(1, "a", "Men", 3.0),
        with_fields(product_doc(2, "b", "Men", 4.0), json!({"discount_price": null})),
    ]);
    let app = router(store, StubScorer::scores(vec![]));

    let (status, body) = get(app, "/products/sale").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("array").len(), 1);
    assert_eq!(body[0]["product_id"], 1);
}

#[tokio::test]
async fn featured_lists_reject_bad_limit() {
    let app = router(shirts(), StubScorer::scores(vec![]));
    let (status, _) = get(app, "/products/hot-picks?limit=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[rstest]
#[case("/product_semantic_search?query=shirt&top_k=abc")]
#[case("/recommendations?top_n=many")]
#[case("/products/sale?limit=1.5")]
#[case("/categories/Men/products?limit=ten")]
#[case("/products/abc")]
#[tokio::test]
async fn malformed_parameters_are_request_errors(#[case] uri: &str) {
    let store = shirts();
    let scorer = StubScorer::scores(vec![0.1, 0.2]);
    let app = router(store.clone(), scorer.clone());

    let (status, body) = get(app, uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["stage"], "request");
    assert!(body["detail"].as_str().expect("detail").len() > 0);
    assert_eq!(store.call_count(), 0);
    assert_eq!(scorer.call_count(), 0);
}
