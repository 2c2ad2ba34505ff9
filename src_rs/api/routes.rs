// 목적:
// - HTTP 라우터를 구성한다.
//
// 설명:
// - 경로 목록:
//   GET /health
//   GET /product_semantic_search?query=..&top_k=..   (q는 query의 별칭)
//   GET /recommendations?top_n=..
//   GET /products/{product_id}
//   GET /products/sale, /products/hot-picks, /products/best-sellers, /products/new-arrivals
//   GET /categories/{main_category}/products?limit=..
// - 요청 추적(TraceLayer)과 CORS를 함께 건다.
//
// 디자인 패턴:
// - 라우팅 테이블(Routing Table).
//
// 참조:
// - src_rs/api/handlers.rs

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    handle_best_sellers, handle_category_products, handle_get_product, handle_health,
    handle_hot_picks, handle_new_arrivals, handle_recommendations, handle_sale_products,
    handle_semantic_search, AppState,
};

pub fn catalog_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/product_semantic_search", get(handle_semantic_search))
        .route("/recommendations", get(handle_recommendations))
        .route("/products/sale", get(handle_sale_products))
        .route("/products/hot-picks", get(handle_hot_picks))
        .route("/products/best-sellers", get(handle_best_sellers))
        .route("/products/new-arrivals", get(handle_new_arrivals))
        .route("/products/{product_id}", get(handle_get_product))
        .route(
            "/categories/{main_category}/products",
            get(handle_category_products),
        )
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(origin = %origin, error = %error, "CORS origin 무시");
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET])
}
