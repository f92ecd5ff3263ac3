//! 연습 시간 기록 모델.
//!
//! 하나의 완료된 연습 세션(start → stop)을 서버에 저장하기 위한 값 객체.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// 코스 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub i64);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CourseId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// 완료된 연습 세션 기록
///
/// stop 이벤트마다 한 번 생성되고, 제출은 최대 한 번.
/// `duration_secs`는 타이머 누산기 값이며 `end_time - start_time`과의
/// 작은 차이는 보정하지 않는다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// 코스 ID
    pub course_id: CourseId,
    /// 세션 시작 시각
    pub start_time: DateTime<Utc>,
    /// 세션 종료 시각 (`start_time` 이상)
    pub end_time: DateTime<Utc>,
    /// 경과 시간 (초)
    #[serde(rename = "duration")]
    pub duration_secs: u64,
}

impl TimeEntry {
    /// 새 기록 생성: `end_time < start_time`이면 거부
    pub fn new(
        course_id: CourseId,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        duration_secs: u64,
    ) -> Result<Self, CoreError> {
        if end_time < start_time {
            return Err(CoreError::Validation {
                field: "end_time".to_string(),
                message: format!("종료 시각 {end_time}이 시작 시각 {start_time}보다 이름"),
            });
        }

        Ok(Self {
            course_id,
            start_time,
            end_time,
            duration_secs,
        })
    }

    /// 벽시계 기준 세션 길이 (초, 내림)
    pub fn wall_clock_secs(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn wire_format_uses_service_field_names() {
        let start = DateTime::parse_from_rfc3339("2026-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let entry = TimeEntry::new(CourseId(7), start, start + Duration::seconds(65), 65).unwrap();

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["course_id"], 7);
        assert_eq!(json["duration"], 65);
        assert_eq!(json["start_time"], "2026-03-01T10:00:00Z");
        assert_eq!(json["end_time"], "2026-03-01T10:01:05Z");
        assert!(json.get("duration_secs").is_none());
    }

    #[test]
    fn rejects_end_before_start() {
        let now = Utc::now();
        let result = TimeEntry::new(CourseId(1), now, now - Duration::seconds(1), 1);
        assert!(matches!(result, Err(CoreError::Validation { .. })));
    }

    #[test]
    fn zero_length_entry_is_valid() {
        let now = Utc::now();
        let entry = TimeEntry::new(CourseId(1), now, now, 0).unwrap();
        assert_eq!(entry.wall_clock_secs(), 0);
    }

    #[test]
    fn course_id_display() {
        assert_eq!(CourseId(42).to_string(), "42");
        assert_eq!(CourseId::from(3), CourseId(3));
    }
}
