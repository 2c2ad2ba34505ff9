// 목적:
// - HTTP 경계 모듈을 선언한다.
//
// 설명:
// - 라우터/핸들러/오류 응답 변환을 분리해 코어 파이프라인과 HTTP 세부 사항을 떼어 놓는다.
//
// 디자인 패턴:
// - 모듈 분리(Module Separation).
//
// 참조:
// - src_rs/api/routes.rs
// - src_rs/api/handlers.rs
// - src_rs/api/response.rs

pub mod handlers;
pub mod response;
pub mod routes;
