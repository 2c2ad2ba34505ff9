use rstest::rstest;

use catalog_search::core::errors::CoreError;
use catalog_search::index::sql::{catalog_query_sql, category_top_sql, validate_identifier};
use catalog_search::index::store::{CatalogFilter, CatalogOrder, CatalogQuery};

#[rstest]
#[case("products")]
#[case("catalog_v2")]
fn accepts_plain_identifiers(#[case] table: &str) {
    assert!(validate_identifier(table, "postgres.table").is_ok());
}

#[rstest]
#[case("")]
#[case("products; DROP TABLE users")]
#[case("public.products")]
#[case("prod-ucts")]
fn rejects_unsafe_identifiers(#[case] table: &str) {
    assert!(matches!(
        validate_identifier(table, "postgres.table"),
        Err(CoreError::InvalidConfig(_))
    ));
}

#[test]
fn full_scan_is_in_catalog_order_with_limit_as_first_param() {
    let query = CatalogQuery::new(CatalogFilter::All, CatalogOrder::Catalog, 100);
    let (sql, binding) = catalog_query_sql("products", &query);

    assert_eq!(
        sql,
        "SELECT product_id, document FROM products ORDER BY product_id LIMIT $1"
    );
    assert!(binding.is_none());
}

#[test]
fn category_filter_binds_category_before_limit() {
    let query = CatalogQuery::new(
        CatalogFilter::MainCategory("Men".to_string()),
        CatalogOrder::Catalog,
        20,
    );
    let (sql, binding) = catalog_query_sql("products", &query);

    assert!(sql.contains("WHERE document->>'main_category' = $1"));
    assert!(sql.ends_with("LIMIT $2"));
    assert_eq!(binding.as_deref(), Some("Men"));
}

#[test]
fn top_rated_orders_by_ratings_then_count() {
    let query = CatalogQuery::new(CatalogFilter::All, CatalogOrder::TopRated, 12);
    let (sql, _) = catalog_query_sql("products", &query);

    let ratings = sql.find("'ratings'").expect("ratings order");
    let count = sql.find("'no_of_ratings'").expect("count order");
    assert!(ratings < count);
}

#[test]
fn category_window_filters_stock_and_sorts_discount_nulls_first() {
    let sql = category_top_sql("products");

    assert!(sql.contains("PARTITION BY document->>'main_category'"));
    assert!(sql.contains("THEN (document->>'stock')::float8 END > 0"));
    assert!(sql.contains("THEN (document->>'discount_price')::float8 END ASC NULLS FIRST"));
    assert!(sql.contains("category_rank <= $1"));
}

#[rstest]
#[case(category_top_sql("products"))]
#[case(catalog_query_sql("products", &CatalogQuery::new(CatalogFilter::All, CatalogOrder::TopRated, 12)).0)]
#[case(catalog_query_sql("products", &CatalogQuery::new(CatalogFilter::All, CatalogOrder::BestRated, 12)).0)]
fn numeric_casts_only_touch_json_numbers(#[case] sql: String) {
    let casts = sql.matches("::float8").count();
    let guards = sql.matches("') = 'number' THEN (").count();

    assert!(casts > 0);
    assert_eq!(casts, guards);
}

#[test]
fn category_window_keeps_non_numeric_stock_for_mapping() {
    let sql = category_top_sql("products");
    assert!(sql.contains("OR jsonb_typeof(document->'stock') IS DISTINCT FROM 'number'"));
}
