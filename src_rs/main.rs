// 목적:
// - 카탈로그 검색/추천 HTTP 서버 바이너리.
//
// 설명:
// - 설정 적재 -> 로깅 초기화 -> 저장소/스코어러 생성 -> 라우터 구동 -> 종료 시 연결 정리 순서다.
// - 저장소와 HTTP 클라이언트는 여기서 한 번 만들고 AppState로 주입한다.
//
// 참조:
// - src_rs/core/config.rs
// - src_rs/api/routes.rs

use std::sync::Arc;

use catalog_search::api::handlers::AppState;
use catalog_search::api::routes::catalog_router;
use catalog_search::core::config::AppConfig;
use catalog_search::core::similarity_http::SimilarityHttpClient;
use catalog_search::index::postgres_repo::PostgresRepository;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log.filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(scorer = ?config.scorer, "설정 적재 완료");
    if config.scorer.auth_token.is_none() {
        tracing::warn!("scorer.auth_token이 없습니다. 스코어러 인증이 실패할 수 있습니다");
    }

    let repository = Arc::new(PostgresRepository::connect(&config.postgres).await?);
    let scorer = Arc::new(SimilarityHttpClient::new(config.scorer.clone())?);

    let state = AppState::new(repository.clone(), scorer, &config);
    let app = catalog_router(state, &config.server.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr.as_str()).await?;
    tracing::info!(bind_addr = %config.server.bind_addr, "HTTP 서버 시작");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    repository.close().await;
    tracing::info!("HTTP 서버 종료");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %error, "Ctrl+C 핸들러 설치 실패");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(error = %error, "SIGTERM 핸들러 설치 실패");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("종료 신호 수신");
}
