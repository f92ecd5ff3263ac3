//! 테스트용 포트 구현.

use async_trait::async_trait;
use parking_lot::Mutex;
use practrack_core::error::CoreError;
use practrack_core::models::timer::ControlStates;
use practrack_core::models::time_entry::TimeEntry;
use practrack_core::ports::api_client::TimeTrackingApi;
use practrack_core::ports::notifier::Notifier;
use practrack_core::ports::timer_view::TimerView;

/// 제출 응답 시나리오
#[derive(Debug, Clone, Copy)]
pub enum FakeResponse {
    Ok,
    Unauthorized,
    ServerError,
}

/// 제출된 기록을 모아두는 API
pub struct FakeApi {
    response: FakeResponse,
    pub entries: Mutex<Vec<TimeEntry>>,
}

impl FakeApi {
    pub fn new(response: FakeResponse) -> Self {
        Self {
            response,
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn submitted(&self) -> Vec<TimeEntry> {
        self.entries.lock().clone()
    }
}

#[async_trait]
impl TimeTrackingApi for FakeApi {
    async fn submit_time_entry(&self, entry: &TimeEntry) -> Result<(), CoreError> {
        self.entries.lock().push(entry.clone());
        match self.response {
            FakeResponse::Ok => Ok(()),
            FakeResponse::Unauthorized => Err(CoreError::Auth("인증 실패: token expired".to_string())),
            FakeResponse::ServerError => Err(CoreError::Api {
                status: 500,
                message: "database is locked".to_string(),
            }),
        }
    }
}

/// 렌더링 기록 뷰
#[derive(Default)]
pub struct RecordingView {
    pub displays: Mutex<Vec<String>>,
    pub controls: Mutex<Vec<ControlStates>>,
}

impl RecordingView {
    pub fn last_display(&self) -> Option<String> {
        self.displays.lock().last().cloned()
    }

    pub fn last_controls(&self) -> Option<ControlStates> {
        self.controls.lock().last().copied()
    }
}

impl TimerView for RecordingView {
    fn render_elapsed(&self, display: &str) {
        self.displays.lock().push(display.to_string());
    }

    fn set_controls(&self, controls: ControlStates) {
        self.controls.lock().push(controls);
    }
}

/// 알림 기록
#[derive(Default)]
pub struct RecordingNotifier {
    pub infos: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn show_notification(&self, _title: &str, body: &str) -> Result<(), CoreError> {
        self.infos.lock().push(body.to_string());
        Ok(())
    }

    async fn show_error(&self, message: &str) -> Result<(), CoreError> {
        self.errors.lock().push(message.to_string());
        Ok(())
    }
}
