// 목적:
// - 카탈로그 단순 조회(단건/카테고리/세일/추천 목록)를 실행한다.
//
// 설명:
// - 조회 조건을 CatalogQuery로 바꿔 저장소에 위임하고, 결과 문서는 mapper로 검증한다.
// - limit은 1 이상이어야 하며 설정된 상한을 넘으면 상한으로 자른다.
//
// 디자인 패턴:
// - 파사드(Facade).
//
// 참조:
// - src_rs/index/store.rs
// - src_rs/core/mapper.rs

use std::sync::Arc;

use crate::core::config::BrowseConfig;
use crate::core::errors::{CoreError, CoreResult};
use crate::core::mapper::{map_document, map_documents};
use crate::core::product::Product;
use crate::index::store::{CatalogFilter, CatalogOrder, CatalogQuery, CatalogStore};

/// 메인 화면에 노출하는 추천 목록 종류다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeaturedList {
    HotPicks,
    BestSellers,
    NewArrivals,
}

impl FeaturedList {
    fn order(self) -> CatalogOrder {
        match self {
            FeaturedList::HotPicks => CatalogOrder::TopRated,
            FeaturedList::BestSellers => CatalogOrder::BestRated,
            FeaturedList::NewArrivals => CatalogOrder::Newest,
        }
    }
}

pub struct BrowsePipeline {
    store: Arc<dyn CatalogStore>,
    config: BrowseConfig,
}

impl BrowsePipeline {
    pub fn new(store: Arc<dyn CatalogStore>, config: BrowseConfig) -> Self {
        Self { store, config }
    }

    pub async fn product(&self, product_id: i64) -> CoreResult<Product> {
        let document = self
            .store
            .fetch_document(product_id)
            .await?
            .ok_or(CoreError::NotFound(product_id))?;
        map_document(document)
    }

    pub async fn by_category(&self, category: &str, limit: Option<i64>) -> CoreResult<Vec<Product>> {
        if category.trim().is_empty() {
            return Err(CoreError::InvalidArgument(
                "main_category는 비어 있을 수 없습니다".to_string(),
            ));
        }

        let limit = self.resolve_limit(limit, self.config.category_limit)?;
        let query = CatalogQuery::new(
            CatalogFilter::MainCategory(category.to_string()),
            CatalogOrder::Catalog,
            limit,
        );
        self.fetch(&query).await
    }

    pub async fn on_sale(&self, limit: Option<i64>) -> CoreResult<Vec<Product>> {
        let limit = self.resolve_limit(limit, self.config.category_limit)?;
        let query = CatalogQuery::new(CatalogFilter::OnSale, CatalogOrder::Catalog, limit);
        self.fetch(&query).await
    }

    pub async fn featured(&self, list: FeaturedList, limit: Option<i64>) -> CoreResult<Vec<Product>> {
        let limit = self.resolve_limit(limit, self.config.featured_limit)?;
        let query = CatalogQuery::new(CatalogFilter::All, list.order(), limit);
        self.fetch(&query).await
    }

    async fn fetch(&self, query: &CatalogQuery) -> CoreResult<Vec<Product>> {
        let documents = self.store.fetch_documents(query).await?;
        tracing::debug!(filter = ?query.filter, order = ?query.order, count = documents.len(), "카탈로그 조회 완료");
        map_documents(documents)
    }

    fn resolve_limit(&self, limit: Option<i64>, default: usize) -> CoreResult<usize> {
        match limit {
            None => Ok(default.min(self.config.max_limit)),
            Some(value) if value <= 0 => Err(CoreError::InvalidArgument(format!(
                "limit은 1 이상이어야 합니다: {}",
                value
            ))),
            Some(value) => Ok(usize::try_from(value)
                .unwrap_or(usize::MAX)
                .min(self.config.max_limit)),
        }
    }
}
