//! 코스별 연습 세션 타이머.
//!
//! Idle → Running → Stopped 상태 머신. Running 동안 틱 태스크가 경과 시간을
//! 다시 계산해 뷰에 그리고, stop 시 0초보다 긴 세션을 기록으로 만들어 제출한다.
//!
//! 상태는 `parking_lot::Mutex` 하나로 보호한다. start마다 실행 세대(generation)를
//! 올리고, 틱은 자신이 만들어진 세대가 현재 세대이고 Running일 때만 쓴다.
//! 따라서 stop/restart가 락을 놓은 뒤에는 취소된 틱이 아직 살아 있어도 상태를 바꿀 수 없다.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use practrack_core::models::time_entry::{CourseId, TimeEntry};
use practrack_core::models::timer::{format_elapsed, ControlStates, TimerState};
use practrack_core::ports::timer_view::TimerView;
use std::ops::ControlFlow;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::events::TimerEvent;
use crate::submitter::{PendingSubmission, TimeEntrySubmitter};
use crate::ticker::TickHandle;

/// 기본 틱 주기
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// stop 결과
#[derive(Debug)]
pub enum StopOutcome {
    /// Running이 아니어서 아무것도 하지 않음
    NotRunning,
    /// 경과 시간이 0초라 기록하지 않음
    Discarded,
    /// 기록 제출 시작
    Submitted(PendingSubmission),
}

#[derive(Default)]
struct TimerInner {
    state: TimerState,
    /// 세션 시작 벽시계 시각 (Idle에서 제거)
    started_at: Option<DateTime<Utc>>,
    /// 세션 시작 단조 시각
    started_instant: Option<Instant>,
    elapsed_secs: u64,
    /// `elapsed_secs`를 계산한 실행 세대
    elapsed_generation: u64,
    generation: u64,
    ticker: Option<TickHandle>,
}

impl TimerInner {
    fn cancel_tick(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    /// 현재 실행에서 계산된 경과 시간 (이전 실행 값은 0)
    fn current_elapsed(&self) -> u64 {
        if self.elapsed_generation == self.generation {
            self.elapsed_secs
        } else {
            0
        }
    }
}

/// 연습 세션 타이머
pub struct SessionTimer {
    course_id: CourseId,
    tick_interval: Duration,
    view: Arc<dyn TimerView>,
    submitter: Arc<TimeEntrySubmitter>,
    inner: Arc<Mutex<TimerInner>>,
}

impl SessionTimer {
    /// 새 타이머 생성: 뷰를 0과 Idle 컨트롤로 초기화한다
    pub fn new(
        course_id: CourseId,
        view: Arc<dyn TimerView>,
        submitter: Arc<TimeEntrySubmitter>,
    ) -> Self {
        view.render_elapsed(&format_elapsed(0));
        view.set_controls(TimerState::Idle.controls());

        Self {
            course_id,
            tick_interval: DEFAULT_TICK_INTERVAL,
            view,
            submitter,
            inner: Arc::new(Mutex::new(TimerInner::default())),
        }
    }

    /// 틱 주기 변경 (0이면 1ms)
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// 측정 시작. Running이면 no-op (false 반환)
    ///
    /// tokio 런타임 안에서 호출해야 한다.
    pub fn start(&self) -> bool {
        let mut inner = self.inner.lock();
        if inner.state == TimerState::Running {
            debug!("이미 측정 중: course={}", self.course_id);
            return false;
        }

        inner.cancel_tick();
        inner.generation += 1;
        let generation = inner.generation;
        let now = Instant::now();
        inner.started_at = Some(Utc::now());
        inner.started_instant = Some(now);
        inner.elapsed_secs = 0;
        inner.state = TimerState::Running;

        let weak = Arc::downgrade(&self.inner);
        let view = Arc::clone(&self.view);
        inner.ticker = Some(TickHandle::spawn(now, self.tick_interval, move || {
            tick(&weak, &view, generation, now)
        }));

        self.view.render_elapsed(&format_elapsed(0));
        self.view.set_controls(inner.state.controls());
        drop(inner);

        info!("연습 시작: course={}", self.course_id);
        self.submitter.events().publish(TimerEvent::Started {
            course_id: self.course_id,
        });
        true
    }

    /// 측정 정지. Running이 아니면 no-op
    ///
    /// 틱은 반환 전에 취소된다. 경과 시간이 있으면 기록 제출 태스크를 띄우고
    /// 완료를 기다리지 않는다.
    pub fn stop(&self) -> StopOutcome {
        let mut inner = self.inner.lock();
        if inner.state != TimerState::Running {
            debug!("측정 중이 아님: course={} state={}", self.course_id, inner.state);
            return StopOutcome::NotRunning;
        }

        inner.cancel_tick();
        inner.state = TimerState::Stopped;

        let elapsed_secs = inner.current_elapsed();
        let started_at = inner.started_at.unwrap_or_else(Utc::now);
        let monotonic = inner
            .started_instant
            .map(|instant| instant.elapsed())
            .unwrap_or_default();
        let end_time = started_at
            + chrono::Duration::from_std(monotonic).unwrap_or_else(|_| chrono::Duration::zero());

        self.view.render_elapsed(&format_elapsed(elapsed_secs));
        self.view.set_controls(inner.state.controls());
        drop(inner);

        info!("연습 정지: course={} elapsed={}s", self.course_id, elapsed_secs);
        self.submitter.events().publish(TimerEvent::Stopped {
            course_id: self.course_id,
            elapsed_secs,
        });

        if elapsed_secs == 0 {
            debug!("0초 세션은 기록하지 않음: course={}", self.course_id);
            return StopOutcome::Discarded;
        }

        match TimeEntry::new(self.course_id, started_at, end_time, elapsed_secs) {
            Ok(entry) => StopOutcome::Submitted(self.submitter.spawn(entry)),
            Err(e) => {
                error!("연습 기록 생성 실패: course={} ({e})", self.course_id);
                StopOutcome::Discarded
            }
        }
    }

    /// 세션 폐기 후 Idle로. 기록은 제출하지 않는다
    ///
    /// Idle에서도 0을 다시 그린다. 상태가 바뀌었으면 true.
    pub fn restart(&self) -> bool {
        let mut inner = self.inner.lock();
        inner.cancel_tick();

        let was = inner.state;
        inner.state = TimerState::Idle;
        inner.elapsed_secs = 0;
        inner.started_at = None;
        inner.started_instant = None;

        self.view.render_elapsed(&format_elapsed(0));
        self.view.set_controls(inner.state.controls());
        drop(inner);

        if was == TimerState::Idle {
            return false;
        }

        info!("연습 초기화: course={}", self.course_id);
        self.submitter.events().publish(TimerEvent::Restarted {
            course_id: self.course_id,
        });
        true
    }

    /// 현재 상태
    pub fn state(&self) -> TimerState {
        self.inner.lock().state
    }

    /// 현재 실행의 경과 시간 (초). Stopped이면 마지막 실행 값
    pub fn elapsed_secs(&self) -> u64 {
        self.inner.lock().current_elapsed()
    }

    /// 경과 시간 표시 문자열
    pub fn display(&self) -> String {
        format_elapsed(self.elapsed_secs())
    }

    /// 현재 컨트롤 활성화 상태
    pub fn controls(&self) -> ControlStates {
        self.state().controls()
    }

    /// 코스 ID
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    /// 세션 시작 시각 (Idle이면 None)
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.inner.lock().started_at
    }
}

fn tick(
    inner: &Weak<Mutex<TimerInner>>,
    view: &Arc<dyn TimerView>,
    generation: u64,
    started: Instant,
) -> ControlFlow<()> {
    let Some(inner) = inner.upgrade() else {
        return ControlFlow::Break(());
    };
    let mut inner = inner.lock();
    if inner.generation != generation || inner.state != TimerState::Running {
        return ControlFlow::Break(());
    }

    let elapsed_secs = started.elapsed().as_secs();
    inner.elapsed_secs = elapsed_secs;
    inner.elapsed_generation = generation;
    view.render_elapsed(&format_elapsed(elapsed_secs));
    ControlFlow::Continue(())
}
