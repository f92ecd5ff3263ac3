//! API 클라이언트 포트.
//!
//! 구현: `practrack-network` crate (reqwest)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::course::{Course, CourseTimeStat};
use crate::models::time_entry::TimeEntry;

/// 연습 시간 기록 전송
///
/// 타이머 제출 경로가 의존하는 최소 표면. 테스트에서는 이 trait만 모킹하면 된다.
#[async_trait]
pub trait TimeTrackingApi: Send + Sync {
    /// 완료된 세션 기록 저장 (`POST /api/time-tracking`)
    ///
    /// 호출당 정확히 한 번 전송한다. 재시도하지 않는다.
    /// 401 계열 응답은 `CoreError::Auth`로 반환해야 한다.
    async fn submit_time_entry(&self, entry: &TimeEntry) -> Result<(), CoreError>;
}

/// HTTP API 클라이언트
#[async_trait]
pub trait ApiClient: TimeTrackingApi {
    /// 접근 가능한 코스 목록 (학생: 배정된 코스, 관리자: 전체)
    async fn list_courses(&self) -> Result<Vec<Course>, CoreError>;

    /// 학생별 코스 누적 연습 시간
    async fn time_stats(&self, student_id: i64) -> Result<Vec<CourseTimeStat>, CoreError>;
}
