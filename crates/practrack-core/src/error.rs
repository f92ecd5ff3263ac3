//! practrack 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 자체 실패를 `CoreError`로 매핑해서 반환한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 직렬화, 설정, 인증, 원격 API 실패 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패: {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 인증 실패 (토큰 만료, 자격증명 오류, 미로그인)
    ///
    /// 호출자는 이 종류를 재로그인 신호로 취급한다.
    #[error("인증 에러: {0}")]
    Auth(String),

    /// 권한 없음 (403)
    #[error("접근 거부: {0}")]
    AccessDenied(String),

    /// 리소스를 찾을 수 없음
    #[error("{resource_type} 미발견: {id}")]
    NotFound {
        /// 리소스 종류 (예: "Course", "API")
        resource_type: String,
        /// 리소스 식별자
        id: String,
    },

    /// 서버가 반환한 그 밖의 에러 응답
    #[error("API 에러 ({status}): {message}")]
    Api {
        /// HTTP 상태 코드
        status: u16,
        /// 서버 메시지 (detail 필드 또는 본문)
        message: String,
    },

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),

    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// Rate Limit 초과 (429)
    #[error("요청 한도 초과, {retry_after_secs}초 후 재시도")]
    RateLimit {
        /// 재시도 대기 시간 (초)
        retry_after_secs: u64,
    },

    /// 서비스 일시 불가 (503)
    #[error("서비스 일시 불가: {0}")]
    ServiceUnavailable(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// 재인증이 필요한 에러인지 (401 계열)
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// 일시적 장애로 재시도할 가치가 있는 에러인지
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::ServiceUnavailable(_) | Self::RateLimit { .. }
        )
    }
}
