//! 연습 타이머 상태 모델.
//!
//! 타이머 상태, 컨트롤 활성화 상태, 경과 시간 표시 형식.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 타이머 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    /// 시작 전 (또는 restart 직후)
    #[default]
    Idle,
    /// 측정 중
    Running,
    /// 정지됨 (세션 기록 제출 완료/시도)
    Stopped,
}

impl TimerState {
    /// 상태별 컨트롤 활성화 상태
    pub fn controls(self) -> ControlStates {
        match self {
            Self::Idle => ControlStates {
                start: true,
                stop: false,
                restart: false,
            },
            Self::Running => ControlStates {
                start: false,
                stop: true,
                restart: true,
            },
            Self::Stopped => ControlStates {
                start: true,
                stop: false,
                restart: true,
            },
        }
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Stopped => "stopped",
        };
        f.write_str(label)
    }
}

/// start/stop/restart 컨트롤 활성화 여부
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlStates {
    pub start: bool,
    pub stop: bool,
    pub restart: bool,
}

/// 경과 초를 `HH:MM:SS`로 변환 (시간은 24에서 감기지 않음)
pub fn format_elapsed(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}
