//! 타이머 표시 포트.
//!
//! 타이머는 표시 영역 하나와 컨트롤 세 개(start/stop/restart)를 구동한다.
//! 뷰는 읽기 전용이며 타이머 상태를 직접 바꾸지 않는다.

use crate::models::timer::ControlStates;

/// 타이머 뷰
///
/// 타이머 내부 락을 잡은 상태에서 호출되므로 블로킹 작업을 하면 안 된다.
pub trait TimerView: Send + Sync {
    /// 경과 시간 표시 (`HH:MM:SS`)
    fn render_elapsed(&self, display: &str);

    /// 컨트롤 활성화 상태 반영
    fn set_controls(&self, controls: ControlStates);
}

/// 아무것도 표시하지 않는 뷰 (헤드리스 실행)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTimerView;

impl TimerView for NullTimerView {
    fn render_elapsed(&self, _display: &str) {}

    fn set_controls(&self, _controls: ControlStates) {}
}
