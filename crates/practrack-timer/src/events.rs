//! 타이머 이벤트 버스.
//!
//! `tokio::broadcast` 기반. 타이머 전이와 제출 결과를 UI 레이어로 전달한다.

use practrack_core::models::time_entry::CourseId;
use tokio::sync::broadcast;
use tracing::debug;

/// 타이머/제출 이벤트
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// 측정 시작
    Started { course_id: CourseId },
    /// 측정 정지
    Stopped {
        course_id: CourseId,
        elapsed_secs: u64,
    },
    /// 세션 폐기 (restart)
    Restarted { course_id: CourseId },
    /// 연습 시간 저장 완료
    EntrySaved {
        course_id: CourseId,
        duration_secs: u64,
    },
    /// 연습 시간 저장 실패 (복구 가능)
    SubmissionFailed {
        course_id: CourseId,
        message: String,
    },
    /// 자격증명 만료: 재로그인 필요
    ReauthRequired { message: String },
}

/// 타이머 이벤트 버스
#[derive(Debug, Clone)]
pub struct TimerEvents {
    tx: broadcast::Sender<TimerEvent>,
}

impl TimerEvents {
    /// 새 이벤트 버스 생성
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// 이벤트 발행 (구독자가 없으면 버림)
    pub fn publish(&self, event: TimerEvent) {
        debug!("타이머 이벤트: {event:?}");
        let _ = self.tx.send(event);
    }

    /// 구독자 생성
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.tx.subscribe()
    }
}

impl Default for TimerEvents {
    fn default() -> Self {
        Self::new(64)
    }
}
