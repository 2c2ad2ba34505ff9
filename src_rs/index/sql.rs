// 목적:
// - SQL 관련 공통 유틸리티를 제공한다.
//
// 설명:
// - 동적 테이블명 검증과 카탈로그 조회 SQL 생성을 담당한다.
// - 문서는 JSONB 컬럼(document)에 그대로 저장되므로 정렬/필터는 JSON 경로 식을 쓴다.
//
// 디자인 패턴:
// - 가드 함수(Guard Function) + 쿼리 빌더(Query Builder).
//
// 참조:
// - src_rs/index/postgres_repo.rs

use crate::core::errors::{CoreError, CoreResult};
use crate::index::store::{CatalogFilter, CatalogOrder, CatalogQuery};

// 숫자가 아닌 JSON 값은 캐스트하지 않고 NULL로 둔다. 깨진 문서는 매퍼가 SchemaMismatch로 보고한다.
const RATINGS: &str = "CASE WHEN jsonb_typeof(document->'ratings') = 'number' \
     THEN (document->>'ratings')::float8 END";
const RATING_COUNT: &str = "CASE WHEN jsonb_typeof(document->'no_of_ratings') = 'number' \
     THEN (document->>'no_of_ratings')::float8 \
     WHEN jsonb_typeof(document->'review_count') = 'number' \
     THEN (document->>'review_count')::float8 END";
const DISCOUNT_PRICE: &str = "CASE WHEN jsonb_typeof(document->'discount_price') = 'number' \
     THEN (document->>'discount_price')::float8 END";
const STOCK: &str = "CASE WHEN jsonb_typeof(document->'stock') = 'number' \
     THEN (document->>'stock')::float8 END";

/// 테이블 식별자의 허용 문자를 검증한다.
pub fn validate_identifier(value: &str, field_name: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::InvalidConfig(format!(
            "{}는 비어 있을 수 없습니다",
            field_name
        )));
    }

    let valid = value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');

    if !valid {
        return Err(CoreError::InvalidConfig(format!(
            "{}에는 영문/숫자/밑줄만 사용할 수 있습니다: {}",
            field_name, value
        )));
    }

    Ok(())
}

/// 조회 조건에 맞는 SELECT 문과 문자열 바인딩 값을 만든다.
///
/// 문자열 바인딩이 있으면 `$1`, limit은 항상 마지막 파라미터다.
pub fn catalog_query_sql(table: &str, query: &CatalogQuery) -> (String, Option<String>) {
    let (where_clause, binding) = match &query.filter {
        CatalogFilter::All => (String::new(), None),
        CatalogFilter::MainCategory(category) => (
            " WHERE document->>'main_category' = $1".to_string(),
            Some(category.clone()),
        ),
        CatalogFilter::OnSale => (
            " WHERE jsonb_typeof(document->'discount_price') = 'number'".to_string(),
            None,
        ),
    };

    let order_clause = match query.order {
        CatalogOrder::Catalog => "product_id".to_string(),
        CatalogOrder::TopRated => format!(
            "{} DESC NULLS LAST, {} DESC NULLS LAST, product_id",
            RATINGS, RATING_COUNT
        ),
        CatalogOrder::BestRated => format!("{} DESC NULLS LAST, product_id", RATINGS),
        CatalogOrder::Newest => {
            "document->>'arrival_date' DESC NULLS LAST, product_id".to_string()
        }
    };

    let limit_param = if binding.is_some() { "$2" } else { "$1" };
    let sql = format!(
        "SELECT product_id, document FROM {}{} ORDER BY {} LIMIT {}",
        table, where_clause, order_clause, limit_param
    );

    (sql, binding)
}

/// 재고가 있는 상품을 main_category별로 순위 매겨 상위 `$1`개만 남기는 SELECT 문을 만든다.
///
/// stock이 숫자가 아닌 문서는 걸러내지 않고 매퍼까지 보낸다.
pub fn category_top_sql(table: &str) -> String {
    format!(
        "SELECT product_id, document FROM ( \
         SELECT product_id, document, ROW_NUMBER() OVER ( \
         PARTITION BY document->>'main_category' \
         ORDER BY {ratings} DESC NULLS LAST, {count} DESC NULLS LAST, \
         {discount} ASC NULLS FIRST, product_id \
         ) AS category_rank \
         FROM {table} \
         WHERE {stock} > 0 OR jsonb_typeof(document->'stock') IS DISTINCT FROM 'number' \
         ) ranked \
         WHERE category_rank <= $1 \
         ORDER BY document->>'main_category', category_rank",
        ratings = RATINGS,
        count = RATING_COUNT,
        discount = DISCOUNT_PRICE,
        table = table,
        stock = STOCK,
    )
}

pub fn single_product_sql(table: &str) -> String {
    format!(
        "SELECT product_id, document FROM {} WHERE product_id = $1",
        table
    )
}
