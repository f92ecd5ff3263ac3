//! HTTP REST API 클라이언트.
//!
//! `ApiClient` 포트 구현. bearer 인증 헤더 자동 주입.
//! 조회 요청만 재시도하며, 연습 시간 기록 전송은 항상 한 번만 시도한다.

use async_trait::async_trait;
use practrack_core::error::CoreError;
use practrack_core::models::course::{Course, CourseTimeStat};
use practrack_core::models::session::SessionContext;
use practrack_core::models::time_entry::TimeEntry;
use practrack_core::ports::api_client::{ApiClient, TimeTrackingApi};
use std::time::Duration;
use tracing::{debug, warn};

use crate::response::check_response;

/// 기본 재시도 횟수
const DEFAULT_MAX_RETRIES: u32 = 3;

/// 재시도 백오프 상한
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// REST API 클라이언트: `ApiClient` 포트 구현
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
    context: SessionContext,
    max_retries: u32,
}

impl HttpApiClient {
    /// 새 HTTP API 클라이언트 생성
    pub fn new(
        base_url: &str,
        context: SessionContext,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            context,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// 재시도 횟수 설정
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Authorization 헤더가 포함된 요청 빌더 반환
    ///
    /// 토큰이 없으면 네트워크를 타기 전에 `CoreError::Auth`.
    async fn authorized_request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, CoreError> {
        let token = self.context.token().await?;
        let url = format!("{}{}", self.base_url, path);
        Ok(self.client.request(method, &url).bearer_auth(token))
    }

    /// 재시도가 포함된 요청 실행
    ///
    /// exponential backoff: 1s → 2s → 4s (최대 30초)
    async fn execute_with_retry<F, Fut, T>(&self, operation: F) -> Result<T, CoreError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let mut delay = Duration::from_secs(1);
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if !e.is_transient() || attempt >= self.max_retries {
                        return Err(e);
                    }

                    warn!(
                        "요청 실패 (시도 {}/{}): {e}, {delay:?} 후 재시도",
                        attempt + 1,
                        self.max_retries + 1
                    );

                    // RateLimit의 경우 서버 지정 대기 시간 사용
                    if let CoreError::RateLimit { retry_after_secs } = &e {
                        delay = Duration::from_secs(*retry_after_secs);
                    }

                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(MAX_BACKOFF);
                    attempt += 1;
                }
            }
        }
    }

    /// 인증 GET 요청 + JSON 파싱
    async fn get_json<T>(&self, path: &str, what: &str) -> Result<T, CoreError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.execute_with_retry(|| async {
            let req = self.authorized_request(reqwest::Method::GET, path).await?;
            let resp = req
                .send()
                .await
                .map_err(|e| CoreError::Network(format!("{what} 요청 실패: {e}")))?;

            let resp = check_response(resp).await?;
            resp.json::<T>()
                .await
                .map_err(|e| CoreError::Internal(format!("{what} 응답 파싱 실패: {e}")))
        })
        .await
    }
}

#[async_trait]
impl TimeTrackingApi for HttpApiClient {
    async fn submit_time_entry(&self, entry: &TimeEntry) -> Result<(), CoreError> {
        debug!(
            "연습 시간 전송: course_id={}, duration={}s",
            entry.course_id, entry.duration_secs
        );

        let req = self
            .authorized_request(reqwest::Method::POST, "/api/time-tracking")
            .await?;

        let resp = req
            .json(entry)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("연습 시간 전송 실패: {e}")))?;

        check_response(resp).await?;
        debug!("연습 시간 저장 완료: course_id={}", entry.course_id);
        Ok(())
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn list_courses(&self) -> Result<Vec<Course>, CoreError> {
        let courses: Vec<Course> = self.get_json("/api/courses", "코스 목록").await?;
        debug!("코스 {}개 수신", courses.len());
        Ok(courses)
    }

    async fn time_stats(&self, student_id: i64) -> Result<Vec<CourseTimeStat>, CoreError> {
        let path = format!("/api/time-stats/{student_id}");
        let stats: Vec<CourseTimeStat> = self.get_json(&path, "연습 통계").await?;
        debug!("연습 통계 {}건 수신: student_id={student_id}", stats.len());
        Ok(stats)
    }
}
