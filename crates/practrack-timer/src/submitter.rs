//! 연습 시간 기록 제출기.
//!
//! 완료된 세션 하나를 서버에 정확히 한 번 전송한다. 버퍼링/재시도 없음.
//! 결과는 `Notifier`와 `TimerEvents`로 UI 레이어에 전달된다.

use practrack_core::models::session::SessionContext;
use practrack_core::models::time_entry::TimeEntry;
use practrack_core::ports::api_client::TimeTrackingApi;
use practrack_core::ports::notifier::Notifier;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::events::{TimerEvent, TimerEvents};

const SAVED_TITLE: &str = "Practice timer";
const SAVED_MESSAGE: &str = "Time tracked successfully";
const FAILED_MESSAGE: &str = "Failed to save time entry";
const REAUTH_MESSAGE: &str = "Session expired. Please log in again.";

/// 제출 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// 서버 저장 완료
    Saved,
    /// 자격증명 거부: 세션이 제거되었고 재로그인이 필요하다
    ReauthRequired { message: String },
    /// 네트워크/검증/서버 오류 (복구 가능)
    Failed { message: String },
}

impl SubmissionOutcome {
    /// 저장 성공 여부
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// 연습 시간 기록 제출기
pub struct TimeEntrySubmitter {
    api: Arc<dyn TimeTrackingApi>,
    context: SessionContext,
    notifier: Option<Arc<dyn Notifier>>,
    events: TimerEvents,
}

impl TimeEntrySubmitter {
    /// 새 제출기 생성
    pub fn new(api: Arc<dyn TimeTrackingApi>, context: SessionContext) -> Self {
        Self {
            api,
            context,
            notifier: None,
            events: TimerEvents::default(),
        }
    }

    /// 알림 포트 연결
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// 이벤트 버스 연결
    pub fn with_events(mut self, events: TimerEvents) -> Self {
        self.events = events;
        self
    }

    /// 연결된 이벤트 버스
    pub fn events(&self) -> &TimerEvents {
        &self.events
    }

    /// 기록 한 건 제출 (단일 시도)
    pub async fn submit(&self, entry: &TimeEntry) -> SubmissionOutcome {
        match self.api.submit_time_entry(entry).await {
            Ok(()) => {
                info!(
                    "연습 시간 저장: course={} duration={}s",
                    entry.course_id, entry.duration_secs
                );
                self.notify(SAVED_TITLE, SAVED_MESSAGE).await;
                self.events.publish(TimerEvent::EntrySaved {
                    course_id: entry.course_id,
                    duration_secs: entry.duration_secs,
                });
                SubmissionOutcome::Saved
            }
            Err(e) if e.is_auth() => {
                warn!("연습 시간 제출 인증 거부: course={} ({e})", entry.course_id);
                if self.context.clear().await {
                    info!("만료된 세션 제거");
                }
                self.notify_error(REAUTH_MESSAGE).await;
                self.events.publish(TimerEvent::ReauthRequired {
                    message: e.to_string(),
                });
                SubmissionOutcome::ReauthRequired {
                    message: e.to_string(),
                }
            }
            Err(e) => {
                error!("연습 시간 제출 실패: course={} ({e})", entry.course_id);
                self.notify_error(FAILED_MESSAGE).await;
                self.events.publish(TimerEvent::SubmissionFailed {
                    course_id: entry.course_id,
                    message: e.to_string(),
                });
                SubmissionOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    /// 백그라운드 태스크로 제출. 호출자를 막지 않는다
    pub fn spawn(self: &Arc<Self>, entry: TimeEntry) -> PendingSubmission {
        let submitter = Arc::clone(self);
        let task_entry = entry.clone();
        let handle = tokio::spawn(async move { submitter.submit(&task_entry).await });
        PendingSubmission { entry, handle }
    }

    async fn notify(&self, title: &str, body: &str) {
        if let Some(notifier) = &self.notifier {
            if let Err(e) = notifier.show_notification(title, body).await {
                warn!("알림 표시 실패: {e}");
            }
        }
    }

    async fn notify_error(&self, message: &str) {
        if let Some(notifier) = &self.notifier {
            if let Err(e) = notifier.show_error(message).await {
                warn!("에러 알림 표시 실패: {e}");
            }
        }
    }
}

/// 진행 중인 제출
#[derive(Debug)]
pub struct PendingSubmission {
    entry: TimeEntry,
    handle: JoinHandle<SubmissionOutcome>,
}

impl PendingSubmission {
    /// 제출 중인 기록
    pub fn entry(&self) -> &TimeEntry {
        &self.entry
    }

    /// 제출 태스크 종료 여부 (결과는 이미 알림/이벤트로 전달됨)
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// 제출 완료 대기
    pub async fn outcome(self) -> SubmissionOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("제출 태스크 중단: {e}");
                SubmissionOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, FakeResponse, RecordingNotifier};
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};
    use practrack_core::models::session::{AuthSession, UserProfile};
    use practrack_core::models::time_entry::CourseId;

    fn entry(duration_secs: u64) -> TimeEntry {
        let start = Utc::now();
        TimeEntry::new(
            CourseId(3),
            start,
            start + Duration::seconds(duration_secs as i64),
            duration_secs,
        )
        .unwrap()
    }

    fn logged_in() -> SessionContext {
        SessionContext::with_session(AuthSession {
            access_token: "jwt_abc".to_string(),
            token_type: "bearer".to_string(),
            user: UserProfile {
                id: 7,
                first_name: "Clara".to_string(),
                last_name: "Schumann".to_string(),
                email: "clara@example.com".to_string(),
                is_admin: false,
            },
            issued_at: Utc::now(),
        })
    }

    fn build(
        response: FakeResponse,
        context: SessionContext,
    ) -> (Arc<FakeApi>, Arc<RecordingNotifier>, TimeEntrySubmitter) {
        let api = Arc::new(FakeApi::new(response));
        let notifier = Arc::new(RecordingNotifier::default());
        let submitter = TimeEntrySubmitter::new(api.clone(), context)
            .with_notifier(notifier.clone());
        (api, notifier, submitter)
    }

    #[tokio::test]
    async fn saved_notifies_success() {
        let (api, notifier, submitter) = build(FakeResponse::Ok, logged_in());
        let mut rx = submitter.events().subscribe();

        let outcome = submitter.submit(&entry(5)).await;

        assert_eq!(outcome, SubmissionOutcome::Saved);
        assert_eq!(api.submitted().len(), 1);
        assert_eq!(notifier.infos.lock().as_slice(), [SAVED_MESSAGE]);
        assert_eq!(
            rx.recv().await.unwrap(),
            TimerEvent::EntrySaved {
                course_id: CourseId(3),
                duration_secs: 5
            }
        );
    }

    #[tokio::test]
    async fn unauthorized_clears_session() {
        let context = logged_in();
        let (api, notifier, submitter) = build(FakeResponse::Unauthorized, context.clone());
        let mut rx = submitter.events().subscribe();

        let outcome = submitter.submit(&entry(5)).await;

        assert_matches!(outcome, SubmissionOutcome::ReauthRequired { .. });
        assert_eq!(api.submitted().len(), 1);
        assert!(!context.is_authenticated().await);
        assert_eq!(notifier.errors.lock().as_slice(), [REAUTH_MESSAGE]);
        assert_matches!(rx.recv().await.unwrap(), TimerEvent::ReauthRequired { .. });
    }

    #[tokio::test]
    async fn server_error_is_recoverable() {
        let context = logged_in();
        let (api, notifier, submitter) = build(FakeResponse::ServerError, context.clone());

        let outcome = submitter.submit(&entry(5)).await;

        assert_matches!(outcome, SubmissionOutcome::Failed { message } if message.contains("database is locked"));
        assert_eq!(api.submitted().len(), 1);
        assert!(context.is_authenticated().await);
        assert_eq!(notifier.errors.lock().as_slice(), [FAILED_MESSAGE]);
    }

    #[tokio::test]
    async fn spawned_submission_resolves() {
        let (api, _notifier, submitter) = build(FakeResponse::Ok, logged_in());
        let submitter = Arc::new(submitter);

        let pending = submitter.spawn(entry(9));
        assert_eq!(pending.entry().duration_secs, 9);
        while !pending.is_finished() {
            tokio::task::yield_now().await;
        }
        assert!(pending.outcome().await.is_saved());
        assert_eq!(api.submitted()[0].duration_secs, 9);
    }

    #[tokio::test]
    async fn works_without_notifier() {
        let api = Arc::new(FakeApi::new(FakeResponse::ServerError));
        let submitter = TimeEntrySubmitter::new(api, logged_in());

        assert_matches!(submitter.submit(&entry(1)).await, SubmissionOutcome::Failed { .. });
    }
}
