// 목적:
// - 카탈로그 검색/추천 서비스 라이브러리의 진입점을 제공한다.
//
// 설명:
// - 바이너리(main.rs)는 설정 적재, 의존성 생성, HTTP 서버 수명 주기만 담당한다.
// - 실제 검색/집계/조회 런타임은 core 계층에 있다.
//
// 디자인 패턴:
// - 계층형 모듈 구조(api/core/index/math).
//
// 참조:
// - src_rs/api/routes.rs
// - src_rs/core/search_pipeline.rs

pub mod api;
pub mod core;
pub mod index;
pub mod math;
