// 목적:
// - PostgreSQL 기반 카탈로그 저장소 접근을 담당한다.
//
// 설명:
// - (product_id BIGINT, document JSONB) 테이블을 읽기 전용으로 조회한다.
// - 카테고리 집계는 윈도 함수로 저장소 쪽에서 그룹/정렬/절삭한다.
// - 테이블명은 실행 시 검증해 SQL 주입 위험을 줄인다.
//
// 디자인 패턴:
// - 저장소 패턴(Repository Pattern).
//
// 참조:
// - src_rs/index/sql.rs
// - src_rs/index/store.rs

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::core::config::PostgresConfig;
use crate::core::errors::{store_error, CoreError, CoreResult};
use crate::index::sql::{catalog_query_sql, category_top_sql, single_product_sql, validate_identifier};
use crate::index::store::{CatalogDocument, CatalogQuery, CatalogStore};

pub struct PostgresRepository {
    pool: PgPool,
    table: String,
}

impl PostgresRepository {
    pub async fn connect(config: &PostgresConfig) -> CoreResult<Self> {
        if config.dsn.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "postgres.dsn은 비어 있을 수 없습니다".to_string(),
            ));
        }

        validate_identifier(&config.table, "postgres.table")?;

        let statement_timeout_ms = config.statement_timeout_ms.max(1);
        let pool = PgPoolOptions::new()
            .min_connections(config.pool_min)
            .max_connections(config.pool_max.max(config.pool_min))
            .acquire_timeout(std::time::Duration::from_millis(config.connect_timeout_ms.max(1)))
            .after_connect(move |connection, _meta| {
                Box::pin(async move {
                    let timeout_statement =
                        format!("SET statement_timeout = {}", statement_timeout_ms);
                    sqlx::query(&timeout_statement).execute(connection).await?;
                    Ok(())
                })
            })
            .connect(&config.dsn)
            .await
            .map_err(|error| store_error("Postgres 연결 실패", error))?;

        tracing::info!(table = %config.table, pool_max = config.pool_max, "카탈로그 저장소 연결 완료");

        Ok(Self {
            pool,
            table: config.table.clone(),
        })
    }

    /// 풀의 모든 연결을 닫는다.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl CatalogStore for PostgresRepository {
    async fn fetch_documents(&self, query: &CatalogQuery) -> CoreResult<Vec<CatalogDocument>> {
        let (sql, binding) = catalog_query_sql(&self.table, query);

        let mut statement = sqlx::query(&sql);
        if let Some(value) = binding {
            statement = statement.bind(value);
        }

        let rows = statement
            .bind(query.limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|error| store_error("카탈로그 조회 실패", error))?;

        rows.into_iter()
            .map(map_document_row)
            .collect::<CoreResult<Vec<_>>>()
    }

    async fn fetch_document(&self, product_id: i64) -> CoreResult<Option<CatalogDocument>> {
        let sql = single_product_sql(&self.table);

        let row = sqlx::query(&sql)
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| store_error("상품 단건 조회 실패", error))?;

        row.map(map_document_row).transpose()
    }

    async fn top_documents_by_category(&self, top_n: usize) -> CoreResult<Vec<CatalogDocument>> {
        let sql = category_top_sql(&self.table);

        let rows = sqlx::query(&sql)
            .bind(top_n as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|error| store_error("카테고리 집계 조회 실패", error))?;

        rows.into_iter()
            .map(map_document_row)
            .collect::<CoreResult<Vec<_>>>()
    }
}

fn map_document_row(row: PgRow) -> CoreResult<CatalogDocument> {
    let product_id = row
        .try_get::<i64, _>("product_id")
        .map_err(|error| CoreError::StoreQuery(format!("product_id 파싱 실패: {}", error)))?;
    let body = row
        .try_get::<Value, _>("document")
        .map_err(|error| CoreError::StoreQuery(format!("document 파싱 실패: {}", error)))?;

    Ok(CatalogDocument { product_id, body })
}
