// 목적:
// - 카탈로그 저장소 경계(trait)와 조회 조건 타입을 정의한다.
//
// 설명:
// - 파이프라인은 구체 저장소가 아니라 CatalogStore에만 의존한다.
// - 저장소는 스키마 없는 문서를 그대로 돌려주고, 검증은 mapper가 맡는다.
//
// 디자인 패턴:
// - 저장소 패턴(Repository Pattern) + 의존성 주입(Dependency Injection).
//
// 참조:
// - src_rs/index/postgres_repo.rs
// - src_rs/core/mapper.rs

use async_trait::async_trait;
use serde_json::Value;

use crate::core::errors::CoreResult;

/// 저장소에 보관된 원본 문서다.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogDocument {
    pub product_id: i64,
    pub body: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogFilter {
    All,
    MainCategory(String),
    OnSale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrder {
    /// product_id 오름차순.
    Catalog,
    /// ratings desc, no_of_ratings desc.
    TopRated,
    /// ratings desc.
    BestRated,
    /// arrival_date desc, 값이 없으면 뒤로.
    Newest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub filter: CatalogFilter,
    pub order: CatalogOrder,
    pub limit: usize,
}

impl CatalogQuery {
    pub fn new(filter: CatalogFilter, order: CatalogOrder, limit: usize) -> Self {
        Self {
            filter,
            order,
            limit,
        }
    }
}

/// 카탈로그 읽기 전용 저장소 경계다.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// 조건에 맞는 문서를 최대 limit개 돌려준다. 결과가 없으면 빈 벡터다.
    async fn fetch_documents(&self, query: &CatalogQuery) -> CoreResult<Vec<CatalogDocument>>;

    async fn fetch_document(&self, product_id: i64) -> CoreResult<Option<CatalogDocument>>;

    /// 재고가 있는 문서를 main_category별 상위 top_n개까지 돌려준다.
    async fn top_documents_by_category(&self, top_n: usize) -> CoreResult<Vec<CatalogDocument>>;
}
