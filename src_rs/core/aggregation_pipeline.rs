// 목적:
// - main_category별 추천 상품 집계 파이프라인을 실행한다.
//
// 설명:
// - 저장소가 재고 필터/카테고리 그룹/정렬/절삭을 먼저 수행한다.
// - 문서 검증 후 메모리에서 같은 규칙을 다시 적용해 저장소 구현과 무관하게 순서와 길이를 보장한다.
//
// 디자인 패턴:
// - 파이프라인(Pipeline).
//
// 참조:
// - src_rs/index/sql.rs
// - src_rs/math/topk.rs

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::core::errors::{CoreError, CoreResult};
use crate::core::mapper::map_documents;
use crate::core::product::{CategoryGroup, Product};
use crate::index::store::CatalogStore;
use crate::math::topk::sort_category_take;

pub struct AggregationPipeline {
    store: Arc<dyn CatalogStore>,
}

impl AggregationPipeline {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// 카테고리별 상위 top_n 상품을 카테고리 이름 순으로 돌려준다.
    pub async fn execute(&self, top_n: i64) -> CoreResult<Vec<CategoryGroup>> {
        if top_n <= 0 {
            return Err(CoreError::InvalidArgument(format!(
                "top_n은 1 이상이어야 합니다: {}",
                top_n
            )));
        }
        let top_n = usize::try_from(top_n)
            .map_err(|_| CoreError::InvalidArgument(format!("top_n이 너무 큽니다: {}", top_n)))?;

        let started = Instant::now();
        let documents = self.store.top_documents_by_category(top_n).await?;
        let products = map_documents(documents)?;
        let groups = group_by_category(products, top_n);

        tracing::info!(
            top_n,
            category_count = groups.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "카테고리 추천 집계 완료"
        );

        Ok(groups)
    }
}

/// 재고가 있는 상품만 main_category로 묶고, 묶음마다 정렬 후 top_n개로 자른다.
pub fn group_by_category(products: Vec<Product>, top_n: usize) -> Vec<CategoryGroup> {
    let mut buckets = BTreeMap::<String, Vec<Product>>::new();
    for product in products.into_iter().filter(|product| product.stock > 0) {
        buckets
            .entry(product.main_category.clone())
            .or_default()
            .push(product);
    }

    buckets
        .into_iter()
        .map(|(category, mut products)| {
            sort_category_take(&mut products, top_n);
            CategoryGroup { category, products }
        })
        .collect()
}
