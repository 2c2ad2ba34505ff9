// 목적:
// - 핵심 런타임 계층 모듈을 선언한다.
//
// 설명:
// - 검색/집계/조회 파이프라인, 스코어러 클라이언트, 공통 오류와 설정 모델을 분리해 유지보수성을 높인다.
//
// 디자인 패턴:
// - 명시적 오류 모델(Explicit Error Model).
//
// 참조:
// - src_rs/core/errors.rs
// - src_rs/core/search_pipeline.rs
// - src_rs/core/aggregation_pipeline.rs

pub mod aggregation_pipeline;
pub mod browse_pipeline;
pub mod config;
pub mod errors;
pub mod mapper;
pub mod product;
pub mod search_pipeline;
pub mod similarity_http;
