// 목적:
// - 시맨틱 검색 작업의 핵심 파이프라인을 실행한다.
//
// 설명:
// - 카탈로그 조회 -> 문서 검증 -> 외부 유사도 스코어링 -> 점수 병합 -> top-k 절삭 순서로 처리한다.
// - 입력 검증은 I/O 전에 끝낸다. 카탈로그가 비어 있으면 스코어러를 부르지 않는다.
// - 점수는 위치가 아니라 product_id로 병합한다.
//
// 디자인 패턴:
// - 파이프라인(Pipeline).
//
// 참조:
// - src_rs/index/store.rs
// - src_rs/core/similarity_http.rs
// - src_rs/math/topk.rs

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::core::errors::{CoreError, CoreResult, ScorerError};
use crate::core::mapper::map_documents;
use crate::core::product::{Candidate, CandidateScore, Product, ScoredProduct};
use crate::core::similarity_http::SimilarityScorer;
use crate::index::store::{CatalogFilter, CatalogOrder, CatalogQuery, CatalogStore};
use crate::math::topk::sort_desc_take;

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub top_k: i64,
}

pub struct SearchPipeline {
    store: Arc<dyn CatalogStore>,
    scorer: Arc<dyn SimilarityScorer>,
    fetch_limit: usize,
}

impl SearchPipeline {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        scorer: Arc<dyn SimilarityScorer>,
        fetch_limit: usize,
    ) -> Self {
        Self {
            store,
            scorer,
            fetch_limit: fetch_limit.max(1),
        }
    }

    /// 검색 파이프라인을 실행한다.
    pub async fn execute(&self, request: &SearchRequest) -> CoreResult<Vec<ScoredProduct>> {
        let top_k = validate_request(request)?;

        let started = Instant::now();
        let query = CatalogQuery::new(CatalogFilter::All, CatalogOrder::Catalog, self.fetch_limit);
        let documents = self.store.fetch_documents(&query).await?;
        if documents.is_empty() {
            tracing::info!(query = %request.query, "카탈로그가 비어 있어 스코어링을 건너뜀");
            return Err(CoreError::NoMatch);
        }

        let products = map_documents(documents)?;
        let candidates = products.iter().map(Candidate::from).collect::<Vec<_>>();
        let scores = self.scorer.score(&request.query, &candidates).await?;

        let mut ranked = merge_scores(products, scores)?;
        let candidate_count = ranked.len();
        sort_desc_take(&mut ranked, top_k);

        tracing::info!(
            query = %request.query,
            top_k,
            candidate_count,
            result_count = ranked.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "시맨틱 검색 완료"
        );

        Ok(ranked)
    }
}

/// 상품마다 같은 product_id의 점수를 붙인다. 조회 순서는 그대로 유지한다.
///
/// 점수가 빠진 상품이나 알 수 없는 product_id의 점수가 있으면 부분 결과 없이 실패한다.
pub fn merge_scores(
    products: Vec<Product>,
    scores: Vec<CandidateScore>,
) -> CoreResult<Vec<ScoredProduct>> {
    if scores.len() != products.len() {
        return Err(ScorerError::Malformed(format!(
            "점수 개수가 상품 수와 다릅니다: expected={}, actual={}",
            products.len(),
            scores.len()
        ))
        .into());
    }

    let mut score_map = scores
        .into_iter()
        .map(|entry| (entry.product_id, entry.score))
        .collect::<HashMap<_, _>>();

    let merged = products
        .into_iter()
        .map(|product| -> CoreResult<ScoredProduct> {
            let score = score_map.remove(&product.product_id).ok_or_else(|| {
                ScorerError::Malformed(format!(
                    "점수가 없는 상품이 있습니다: product_id={}",
                    product.product_id
                ))
            })?;
            Ok(ScoredProduct { product, score })
        })
        .collect::<CoreResult<Vec<_>>>()?;

    if let Some(unknown_id) = score_map.keys().next() {
        return Err(ScorerError::Malformed(format!(
            "조회하지 않은 상품의 점수가 있습니다: product_id={}",
            unknown_id
        ))
        .into());
    }

    Ok(merged)
}

fn validate_request(request: &SearchRequest) -> CoreResult<usize> {
    if request.query.trim().is_empty() {
        return Err(CoreError::InvalidArgument(
            "query는 비어 있을 수 없습니다".to_string(),
        ));
    }

    if request.top_k <= 0 {
        return Err(CoreError::InvalidArgument(format!(
            "top_k는 1 이상이어야 합니다: {}",
            request.top_k
        )));
    }

    usize::try_from(request.top_k)
        .map_err(|_| CoreError::InvalidArgument(format!("top_k가 너무 큽니다: {}", request.top_k)))
}
