// 목적:
// - 서비스 실행 설정을 정의하고 적재한다.
//
// 설명:
// - 기본값 -> TOML 파일 -> CATALOG_ 접두사 환경 변수 순서로 덮어쓴다.
// - 중첩 키는 `__`로 구분한다(예: CATALOG_SCORER__AUTH_TOKEN).
// - 스코어러 인증 토큰은 설정/환경 변수로만 주입한다.
//
// 디자인 패턴:
// - 계층형 설정(Layered Configuration).
//
// 참조:
// - src_rs/main.rs
// - src_rs/core/similarity_http.rs
// - src_rs/index/postgres_repo.rs

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::core::errors::{CoreError, CoreResult};

pub const CONFIG_ENV_PREFIX: &str = "CATALOG_";
pub const CONFIG_PATH_ENV: &str = "CATALOG_CONFIG";
pub const DEFAULT_CONFIG_FILENAME: &str = "catalog_search.toml";

const DEFAULT_SCORER_URL: &str =
    "https://router.huggingface.co/hf-inference/models/sentence-transformers/all-MiniLM-L6-v2";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub postgres: PostgresConfig,
    pub scorer: ScorerConfig,
    pub search: SearchConfig,
    pub aggregation: AggregationConfig,
    pub browse: BrowseConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostgresConfig {
    pub dsn: String,
    pub table: String,
    pub pool_min: u32,
    pub pool_max: u32,
    pub connect_timeout_ms: u64,
    pub statement_timeout_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            dsn: "postgres://localhost:5432/ecommerce".to_string(),
            table: "products".to_string(),
            pool_min: 1,
            pool_max: 10,
            connect_timeout_ms: 3_000,
            statement_timeout_ms: 5_000,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub url: String,
    pub timeout_ms: u64,
    pub auth_token: Option<String>,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SCORER_URL.to_string(),
            timeout_ms: 10_000,
            auth_token: None,
            max_retries: 2,
            retry_backoff_ms: 200,
        }
    }
}

// 토큰이 로그에 남지 않도록 Debug를 직접 구현한다.
impl std::fmt::Debug for ScorerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScorerConfig")
            .field("url", &self.url)
            .field("timeout_ms", &self.timeout_ms)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "***"))
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// 한 요청에서 스코어링할 후보 수 상한.
    pub fetch_limit: usize,
    pub default_top_k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fetch_limit: 100,
            default_top_k: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    pub default_top_n: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self { default_top_n: 5 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    pub category_limit: usize,
    pub featured_limit: usize,
    pub max_limit: usize,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            category_limit: 20,
            featured_limit: 12,
            max_limit: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// RUST_LOG가 없을 때 쓰는 EnvFilter 식.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info,tower_http=info,sqlx=warn".to_string(),
        }
    }
}

impl AppConfig {
    /// CATALOG_CONFIG 경로(없으면 기본 파일명)와 환경 변수로 설정을 적재한다.
    pub fn load() -> CoreResult<Self> {
        let path = env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILENAME));
        Self::from_figment(Self::figment(&path))
    }

    /// 설정 소스를 병합한 Figment를 만든다. 파일이 없으면 해당 계층은 비어 있다.
    pub fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(CONFIG_ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: Figment) -> CoreResult<Self> {
        let config: AppConfig = figment
            .extract()
            .map_err(|error| CoreError::InvalidConfig(format!("설정 추출 실패: {}", error)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.server.bind_addr.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "server.bind_addr는 비어 있을 수 없습니다".to_string(),
            ));
        }

        if self.postgres.dsn.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "postgres.dsn은 비어 있을 수 없습니다".to_string(),
            ));
        }

        if self.postgres.pool_max == 0 {
            return Err(CoreError::InvalidConfig(
                "postgres.pool_max는 1 이상이어야 합니다".to_string(),
            ));
        }

        if self.scorer.url.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "scorer.url은 비어 있을 수 없습니다".to_string(),
            ));
        }

        if self.scorer.timeout_ms == 0 {
            return Err(CoreError::InvalidConfig(
                "scorer.timeout_ms는 1 이상이어야 합니다".to_string(),
            ));
        }

        if self.search.fetch_limit == 0 {
            return Err(CoreError::InvalidConfig(
                "search.fetch_limit은 1 이상이어야 합니다".to_string(),
            ));
        }

        if self.search.default_top_k == 0 {
            return Err(CoreError::InvalidConfig(
                "search.default_top_k는 1 이상이어야 합니다".to_string(),
            ));
        }

        if self.aggregation.default_top_n == 0 {
            return Err(CoreError::InvalidConfig(
                "aggregation.default_top_n은 1 이상이어야 합니다".to_string(),
            ));
        }

        if self.browse.max_limit == 0
            || self.browse.category_limit == 0
            || self.browse.featured_limit == 0
        {
            return Err(CoreError::InvalidConfig(
                "browse 한도 값은 모두 1 이상이어야 합니다".to_string(),
            ));
        }

        Ok(())
    }
}
