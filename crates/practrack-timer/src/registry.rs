//! 코스별 타이머 레지스트리.
//!
//! 같은 코스에 대해 타이머를 여러 번 초기화해도 같은 인스턴스를 돌려준다.
//! 틱 태스크가 중복으로 생기는 일을 막는다.

use parking_lot::Mutex;
use practrack_core::models::time_entry::CourseId;
use practrack_core::ports::timer_view::TimerView;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::submitter::TimeEntrySubmitter;
use crate::timer::{SessionTimer, DEFAULT_TICK_INTERVAL};

/// 코스별 타이머 레지스트리
pub struct TimerRegistry {
    submitter: Arc<TimeEntrySubmitter>,
    tick_interval: Duration,
    timers: Mutex<HashMap<CourseId, Arc<SessionTimer>>>,
}

impl TimerRegistry {
    /// 새 레지스트리 생성
    pub fn new(submitter: Arc<TimeEntrySubmitter>) -> Self {
        Self {
            submitter,
            tick_interval: DEFAULT_TICK_INTERVAL,
            timers: Mutex::new(HashMap::new()),
        }
    }

    /// 새로 만드는 타이머의 틱 주기
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// 코스 타이머 반환. 없을 때만 `view`로 새로 만든다
    pub fn timer_for(&self, course_id: CourseId, view: Arc<dyn TimerView>) -> Arc<SessionTimer> {
        let mut timers = self.timers.lock();
        if let Some(timer) = timers.get(&course_id) {
            debug!("기존 타이머 재사용: course={course_id}");
            return Arc::clone(timer);
        }

        let timer = Arc::new(
            SessionTimer::new(course_id, view, Arc::clone(&self.submitter))
                .with_tick_interval(self.tick_interval),
        );
        timers.insert(course_id, Arc::clone(&timer));
        debug!("타이머 생성: course={course_id}");
        timer
    }

    /// 이미 초기화된 타이머
    pub fn get(&self, course_id: CourseId) -> Option<Arc<SessionTimer>> {
        self.timers.lock().get(&course_id).cloned()
    }

    /// 타이머 해제 (화면 이탈). 진행 중인 세션은 기록 없이 폐기된다
    pub fn release(&self, course_id: CourseId) -> bool {
        let removed = self.timers.lock().remove(&course_id);
        match removed {
            Some(timer) => {
                timer.restart();
                debug!("타이머 해제: course={course_id}");
                true
            }
            None => false,
        }
    }

    /// 초기화된 타이머 수
    pub fn len(&self) -> usize {
        self.timers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.lock().is_empty()
    }
}
