// 목적:
// - Rust 코어 계층의 표준 오류 타입을 정의한다.
//
// 설명:
// - 입력/설정/저장소/스코어러/스키마 오류를 명시적으로 구분해 HTTP 계층에 전달한다.
// - 어느 단계(stage)에서 실패했는지 응답에서 구분할 수 있어야 한다.
//
// 디자인 패턴:
// - 도메인 오류 열거형(Domain Error Enum).
//
// 참조:
// - src_rs/core/search_pipeline.rs
// - src_rs/api/response.rs

use thiserror::Error;

/// 외부 유사도 스코어러 호출 실패를 하나의 타입으로 묶는다.
#[derive(Debug, Error)]
pub enum ScorerError {
    #[error("스코어러에 연결할 수 없습니다: {0}")]
    Unavailable(String),
    #[error("스코어러 상태 오류: status={status}, body={body}")]
    Status { status: u16, body: String },
    #[error("스코어러 응답 형식이 올바르지 않습니다: {0}")]
    Malformed(String),
}

impl ScorerError {
    /// 재시도해도 되는 실패인지 판정한다.
    pub fn is_retryable(&self) -> bool {
        match self {
            ScorerError::Unavailable(_) => true,
            ScorerError::Status { status, .. } => *status == 429 || *status >= 500,
            ScorerError::Malformed(_) => false,
        }
    }
}

/// 코어 계층에서 공통으로 사용하는 오류 열거형이다.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("입력값이 유효하지 않습니다: {0}")]
    InvalidArgument(String),
    #[error("설정값이 유효하지 않습니다: {0}")]
    InvalidConfig(String),
    #[error("카탈로그 저장소에 연결할 수 없습니다: {0}")]
    StoreUnavailable(String),
    #[error("카탈로그 조회에 실패했습니다: {0}")]
    StoreQuery(String),
    #[error(transparent)]
    Scorer(#[from] ScorerError),
    #[error("상품 문서 스키마가 일치하지 않습니다: product_id={product_id}, field={field}, {reason}")]
    SchemaMismatch {
        product_id: i64,
        field: String,
        reason: String,
    },
    #[error("검색 대상 상품이 없습니다")]
    NoMatch,
    #[error("상품을 찾을 수 없습니다: product_id={0}")]
    NotFound(i64),
    #[error("런타임 처리 중 오류가 발생했습니다: {0}")]
    Runtime(String),
}

impl CoreError {
    /// 실패한 파이프라인 단계 이름을 반환한다.
    pub fn stage(&self) -> &'static str {
        match self {
            CoreError::InvalidArgument(_) => "request",
            CoreError::InvalidConfig(_) => "config",
            CoreError::StoreUnavailable(_) | CoreError::StoreQuery(_) => "store",
            CoreError::Scorer(_) => "scorer",
            CoreError::SchemaMismatch { .. } => "mapper",
            CoreError::NoMatch | CoreError::NotFound(_) => "catalog",
            CoreError::Runtime(_) => "runtime",
        }
    }
}

/// sqlx 오류를 연결 실패와 조회 실패로 나눠 변환한다.
pub fn store_error(context: &str, error: sqlx::Error) -> CoreError {
    match error {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => {
            CoreError::StoreUnavailable(format!("{}: {}", context, error))
        }
        other => CoreError::StoreQuery(format!("{}: {}", context, other)),
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
