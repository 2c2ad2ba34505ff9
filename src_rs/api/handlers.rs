// 목적:
// - 검색/추천/조회 HTTP 핸들러를 제공한다.
//
// 설명:
// - 쿼리 파라미터를 파이프라인 요청으로 바꿔 실행하고 결과를 JSON으로 반환한다.
// - 파이프라인과 저장소/스코어러 핸들은 AppState로 주입받는다.
//
// 디자인 패턴:
// - 파사드(Facade) + 의존성 주입(Dependency Injection).
//
// 참조:
// - src_rs/core/search_pipeline.rs
// - src_rs/core/aggregation_pipeline.rs
// - src_rs/core/browse_pipeline.rs

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::response::ApiError;
use crate::core::aggregation_pipeline::AggregationPipeline;
use crate::core::browse_pipeline::{BrowsePipeline, FeaturedList};
use crate::core::config::AppConfig;
use crate::core::product::{Product, ScoredProduct};
use crate::core::search_pipeline::{SearchPipeline, SearchRequest};
use crate::core::similarity_http::SimilarityScorer;
use crate::index::store::CatalogStore;

/// 핸들러가 공유하는 요청 처리 상태다. 요청 간에 변경되는 값은 없다.
#[derive(Clone)]
pub struct AppState {
    search: Arc<SearchPipeline>,
    aggregation: Arc<AggregationPipeline>,
    browse: Arc<BrowsePipeline>,
    default_top_k: usize,
    default_top_n: usize,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        scorer: Arc<dyn SimilarityScorer>,
        config: &AppConfig,
    ) -> Self {
        Self {
            search: Arc::new(SearchPipeline::new(
                store.clone(),
                scorer,
                config.search.fetch_limit,
            )),
            aggregation: Arc::new(AggregationPipeline::new(store.clone())),
            browse: Arc::new(BrowsePipeline::new(store, config.browse.clone())),
            default_top_k: config.search.default_top_k,
            default_top_n: config.aggregation.default_top_n,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(alias = "q")]
    pub query: Option<String>,
    pub top_k: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    pub top_n: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn handle_semantic_search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<ScoredProduct>>, ApiError> {
    let Query(params) = params?;
    let request = SearchRequest {
        query: params.query.unwrap_or_default(),
        top_k: params.top_k.unwrap_or(state.default_top_k as i64),
    };

    let results = state.search.execute(&request).await?;
    Ok(Json(results))
}

pub async fn handle_recommendations(
    State(state): State<AppState>,
    params: Result<Query<RecommendationParams>, QueryRejection>,
) -> Result<Json<BTreeMap<String, Vec<Product>>>, ApiError> {
    let Query(params) = params?;
    let top_n = params.top_n.unwrap_or(state.default_top_n as i64);
    let groups = state.aggregation.execute(top_n).await?;

    let body = groups
        .into_iter()
        .map(|group| (group.category, group.products))
        .collect::<BTreeMap<_, _>>();
    Ok(Json(body))
}

pub async fn handle_get_product(
    State(state): State<AppState>,
    product_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let Path(product_id) = product_id?;
    Ok(Json(state.browse.product(product_id).await?))
}

pub async fn handle_category_products(
    State(state): State<AppState>,
    main_category: Result<Path<String>, PathRejection>,
    params: Result<Query<LimitParams>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Path(main_category) = main_category?;
    let Query(params) = params?;
    Ok(Json(
        state.browse.by_category(&main_category, params.limit).await?,
    ))
}

pub async fn handle_sale_products(
    State(state): State<AppState>,
    params: Result<Query<LimitParams>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(params) = params?;
    Ok(Json(state.browse.on_sale(params.limit).await?))
}

pub async fn handle_hot_picks(
    State(state): State<AppState>,
    params: Result<Query<LimitParams>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(params) = params?;
    Ok(Json(
        state
            .browse
            .featured(FeaturedList::HotPicks, params.limit)
            .await?,
    ))
}

pub async fn handle_best_sellers(
    State(state): State<AppState>,
    params: Result<Query<LimitParams>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(params) = params?;
    Ok(Json(
        state
            .browse
            .featured(FeaturedList::BestSellers, params.limit)
            .await?,
    ))
}

pub async fn handle_new_arrivals(
    State(state): State<AppState>,
    params: Result<Query<LimitParams>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(params) = params?;
    Ok(Json(
        state
            .browse
            .featured(FeaturedList::NewArrivals, params.limit)
            .await?,
    ))
}

pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
