// 목적:
// - 코어 오류를 HTTP 응답으로 변환한다.
//
// 설명:
// - 실패 단계(stage)와 상세 메시지를 함께 내려 저장소 장애와 스코어러 장애를 구분할 수 있게 한다.
// - 입력 오류는 400, 결과 없음은 404, 스코어러 장애는 502, 저장소 연결 장애는 503이다.
//
// 디자인 패턴:
// - 어댑터(Adapter).
//
// 참조:
// - src_rs/core/errors.rs

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::core::errors::CoreError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub stage: &'static str,
    pub detail: String,
}

#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        Self(error)
    }
}

// 쿼리/경로 파라미터 파싱 실패도 같은 오류 본문으로 내린다.
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(CoreError::InvalidArgument(format!(
            "쿼리 파라미터가 올바르지 않습니다: {}",
            rejection.body_text()
        )))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(CoreError::InvalidArgument(format!(
            "경로 파라미터가 올바르지 않습니다: {}",
            rejection.body_text()
        )))
    }
}

pub fn status_for(error: &CoreError) -> StatusCode {
    match error {
        CoreError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        CoreError::NoMatch | CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CoreError::Scorer(_) => StatusCode::BAD_GATEWAY,
        CoreError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        CoreError::InvalidConfig(_)
        | CoreError::StoreQuery(_)
        | CoreError::SchemaMismatch { .. }
        | CoreError::Runtime(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let stage = self.0.stage();
        if status.is_server_error() {
            tracing::error!(stage, error = %self.0, "요청 처리 실패");
        } else {
            tracing::debug!(stage, error = %self.0, "요청 거부");
        }

        let body = ErrorBody {
            stage,
            detail: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
