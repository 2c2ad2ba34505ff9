// 목적:
// - 검색 후보에 대한 외부 유사도 스코어러 HTTP 호출을 담당한다.
//
// 설명:
// - 질의문과 후보 이름 목록을 한 번에 보내고, 후보와 같은 순서의 점수 배열을 받는다.
// - 받은 점수는 즉시 product_id와 짝지어 돌려준다. 길이가 다르면 부분 결과 없이 실패한다.
// - 연결 실패/429/5xx는 설정된 횟수만큼 지수 백오프로 재시도한다.
//
// 디자인 패턴:
// - 어댑터(Adapter) + 제한 재시도(Bounded Retry).
//
// 참조:
// - src_rs/core/search_pipeline.rs
// - src_rs/core/config.rs

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};

use crate::core::config::ScorerConfig;
use crate::core::errors::{CoreError, CoreResult, ScorerError};
use crate::core::product::{Candidate, CandidateScore};

const MAX_BACKOFF_MS: u64 = 5_000;

/// 외부 유사도 스코어러 경계다.
#[async_trait]
pub trait SimilarityScorer: Send + Sync {
    /// 후보마다 점수 하나를 돌려준다. 반환 순서는 입력 순서와 같다.
    async fn score(&self, query: &str, candidates: &[Candidate]) -> CoreResult<Vec<CandidateScore>>;
}

#[derive(Clone)]
pub struct SimilarityHttpClient {
    client: Client,
    config: ScorerConfig,
}

impl SimilarityHttpClient {
    pub fn new(config: ScorerConfig) -> CoreResult<Self> {
        if config.url.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "scorer.url은 비어 있을 수 없습니다".to_string(),
            ));
        }

        if config.timeout_ms == 0 {
            return Err(CoreError::InvalidConfig(
                "scorer.timeout_ms는 1 이상이어야 합니다".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|error| CoreError::Runtime(format!("HTTP 클라이언트 생성 실패: {}", error)))?;

        Ok(Self { client, config })
    }

    async fn score_once(&self, query: &str, sentences: &[&str]) -> Result<Vec<f64>, ScorerError> {
        #[derive(Serialize)]
        struct SimilarityInputs<'a> {
            source_sentence: &'a str,
            sentences: &'a [&'a str],
        }

        #[derive(Serialize)]
        struct SimilarityRequest<'a> {
            inputs: SimilarityInputs<'a>,
        }

        let request_body = SimilarityRequest {
            inputs: SimilarityInputs {
                source_sentence: query,
                sentences,
            },
        };

        let mut request_builder = self.client.post(self.config.url.as_str()).json(&request_body);
        if let Some(token) = self.config.auth_token.as_ref() {
            request_builder = request_builder.bearer_auth(token);
        }

        let response = request_builder
            .send()
            .await
            .map_err(|error| ScorerError::Unavailable(format!("스코어러 HTTP 요청 실패: {}", error)))?;

        let status = response.status();
        let body = response.text().await.map_err(|error| {
            ScorerError::Unavailable(format!("스코어러 HTTP 본문 읽기 실패: {}", error))
        })?;

        if !status.is_success() {
            return Err(ScorerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_score_response(&body)
            .map_err(|error| ScorerError::Malformed(format!("{}, body={}", error, body)))
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.min(16);
        Duration::from_millis(
            self.config
                .retry_backoff_ms
                .saturating_mul(factor)
                .min(MAX_BACKOFF_MS),
        )
    }
}

#[async_trait]
impl SimilarityScorer for SimilarityHttpClient {
    async fn score(&self, query: &str, candidates: &[Candidate]) -> CoreResult<Vec<CandidateScore>> {
        if query.trim().is_empty() {
            return Err(CoreError::InvalidArgument(
                "query는 비어 있을 수 없습니다".to_string(),
            ));
        }

        if candidates.is_empty() {
            return Err(CoreError::InvalidArgument(
                "스코어링할 후보가 최소 1개 이상이어야 합니다".to_string(),
            ));
        }

        let sentences = candidates
            .iter()
            .map(|candidate| candidate.name.as_str())
            .collect::<Vec<_>>();

        let started = Instant::now();
        let mut attempt = 0u32;
        let scores = loop {
            match self.score_once(query, &sentences).await {
                Ok(scores) => break scores,
                Err(error) if error.is_retryable() && attempt < self.config.max_retries => {
                    let delay = self.backoff(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "스코어러 호출 재시도"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => {
                    tracing::error!(attempts = attempt + 1, error = %error, "스코어러 호출 실패");
                    return Err(error.into());
                }
            }
        };

        tracing::debug!(
            candidates = candidates.len(),
            attempts = attempt + 1,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "스코어러 호출 완료"
        );

        pair_scores(candidates, scores).map_err(CoreError::from)
    }
}

fn pair_scores(
    candidates: &[Candidate],
    scores: Vec<f64>,
) -> Result<Vec<CandidateScore>, ScorerError> {
    if scores.len() != candidates.len() {
        return Err(ScorerError::Malformed(format!(
            "점수 개수가 후보 수와 다릅니다: expected={}, actual={}",
            candidates.len(),
            scores.len()
        )));
    }

    Ok(candidates
        .iter()
        .zip(scores)
        .map(|(candidate, score)| CandidateScore {
            product_id: candidate.product_id,
            score,
        })
        .collect())
}

fn parse_score_response(body: &str) -> Result<Vec<f64>, String> {
    let value: Value = serde_json::from_str(body.trim())
        .map_err(|error| format!("JSON 파싱 실패: {}", error))?;

    let items = value
        .as_array()
        .ok_or_else(|| "점수 응답은 JSON 배열이어야 합니다".to_string())?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_f64()
                .filter(|score| score.is_finite())
                .ok_or_else(|| format!("숫자가 아닌 점수가 있습니다: index={}", index))
        })
        .collect()
}
