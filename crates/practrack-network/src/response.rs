//! 응답 상태 코드 → `CoreError` 매핑.

use practrack_core::error::CoreError;
use reqwest::header::RETRY_AFTER;
use tracing::warn;

/// Retry-After 헤더가 없을 때 기본 대기 시간 (초)
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// 응답 상태 코드 확인 및 에러 매핑
///
/// 401 → Auth, 403 → AccessDenied, 404 → NotFound, 429 → RateLimit,
/// 503 → ServiceUnavailable, 그 외 → Api
pub(crate) async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, CoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let retry_after = resp
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);

    let text = resp.text().await.unwrap_or_else(|e| {
        warn!("응답 본문 읽기 실패: {e}");
        String::new()
    });
    let message = error_message(&text);

    Err(match status.as_u16() {
        401 => CoreError::Auth(format!("인증 실패: {message}")),
        403 => CoreError::AccessDenied(message),
        404 => CoreError::NotFound {
            resource_type: "API".to_string(),
            id: message,
        },
        429 => CoreError::RateLimit {
            retry_after_secs: retry_after,
        },
        503 => CoreError::ServiceUnavailable(message),
        code => CoreError::Api {
            status: code,
            message,
        },
    })
}

/// 에러 본문에서 사람이 읽을 메시지 추출
///
/// JSON `detail`(문자열 또는 검증 에러 배열) → `message` → 본문 원문 순서.
pub(crate) fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["detail", "message"] {
            match value.get(key) {
                Some(serde_json::Value::String(s)) => return s.clone(),
                Some(serde_json::Value::Null) | None => {}
                Some(other) => return other.to_string(),
            }
        }
    }

    if trimmed.is_empty() {
        "알 수 없는 에러".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_is_preferred() {
        assert_eq!(
            error_message(r#"{"detail":"Invalid credentials","message":"x"}"#),
            "Invalid credentials"
        );
    }

    #[test]
    fn message_field_fallback() {
        assert_eq!(error_message(r#"{"message":"nope"}"#), "nope");
    }

    #[test]
    fn validation_detail_array_is_stringified() {
        let msg = error_message(r#"{"detail":[{"loc":["body","course_id"],"msg":"field required"}]}"#);
        assert!(msg.contains("field required"));
    }

    #[test]
    fn plain_text_and_empty_bodies() {
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message("   "), "알 수 없는 에러");
    }
}
