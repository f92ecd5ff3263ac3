//! # practrack-timer
//!
//! 연습 시간 측정 파이프라인.
//! 코스별 세션 타이머(Idle → Running → Stopped 상태 머신)가 1초 틱으로
//! 경과 시간을 표시하고, stop 시 완료된 세션을 서버에 한 번 제출한다.
//!
//! - [`timer`] - `SessionTimer` 상태 머신
//! - [`ticker`] - 취소 가능한 주기 태스크 핸들
//! - [`submitter`] - 연습 시간 기록 단일 제출
//! - [`registry`] - 코스별 타이머 멱등 초기화
//! - [`events`] - 타이머/제출 이벤트 브로드캐스트

pub mod events;
pub mod registry;
pub mod submitter;
pub mod ticker;
pub mod timer;

#[cfg(test)]
pub(crate) mod testing;
