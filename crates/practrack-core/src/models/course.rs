//! 코스 및 연습 시간 통계 모델.

use serde::{Deserialize, Serialize};

use crate::models::time_entry::CourseId;

/// 코스 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// 코스 ID
    pub id: CourseId,
    /// 코스 이름
    pub name: String,
    /// 설명
    #[serde(default)]
    pub description: Option<String>,
    /// 생성 시각 (서버 문자열 그대로)
    #[serde(default)]
    pub created_at: Option<String>,
}

/// 코스별 누적 연습 시간
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseTimeStat {
    /// 코스 이름
    pub course_name: String,
    /// 누적 시간 (초)
    #[serde(default)]
    pub total_time: u64,
    /// 세션 수
    #[serde(default)]
    pub sessions: u64,
}

impl CourseTimeStat {
    /// `"{h}h {m}m"` 형식의 누적 시간
    pub fn total_label(&self) -> String {
        let hours = self.total_time / 3600;
        let minutes = (self.total_time % 3600) / 60;
        format!("{hours}h {minutes}m")
    }

    /// 세션당 평균 시간 (초), 세션이 없으면 0
    pub fn average_secs(&self) -> u64 {
        self.total_time.checked_div(self.sessions).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_deserializes_without_optional_fields() {
        let course: Course = serde_json::from_str(r#"{"id":3,"name":"Piano I"}"#).unwrap();
        assert_eq!(course.id, CourseId(3));
        assert_eq!(course.name, "Piano I");
        assert!(course.description.is_none());
    }

    #[test]
    fn stat_label_and_average() {
        let stat = CourseTimeStat {
            course_name: "Violin".to_string(),
            total_time: 3 * 3600 + 25 * 60 + 10,
            sessions: 4,
        };
        assert_eq!(stat.total_label(), "3h 25m");
        assert_eq!(stat.average_secs(), stat.total_time / 4);
    }

    #[test]
    fn average_without_sessions_is_zero() {
        let stat: CourseTimeStat =
            serde_json::from_str(r#"{"course_name":"Drums","total_time":0,"sessions":0}"#)
                .unwrap();
        assert_eq!(stat.average_secs(), 0);
        assert_eq!(stat.total_label(), "0h 0m");
    }
}
