//! 터미널 어댑터.
//!
//! `TimerView`와 `Notifier` 포트를 표준 출력으로 구현한다.

use async_trait::async_trait;
use practrack_core::error::CoreError;
use practrack_core::models::timer::ControlStates;
use practrack_core::ports::notifier::Notifier;
use practrack_core::ports::timer_view::TimerView;
use std::io::{self, Write};
use std::thread;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// 활성 컨트롤 안내 문자열 (비활성 컨트롤은 `-`로 표시)
pub fn control_hint(controls: ControlStates) -> String {
    let label = |enabled: bool, name: &'static str| if enabled { name } else { "-" };
    format!(
        "[{}] [{}] [{}]",
        label(controls.start, "start"),
        label(controls.stop, "stop"),
        label(controls.restart, "restart"),
    )
}

/// 한 줄을 덮어쓰며 경과 시간을 그리는 뷰
///
/// 타이머 락 안에서는 채널에 넣기만 하고, 실제 쓰기와 flush는 전용 스레드가 한다.
pub struct TerminalTimerView {
    tx: mpsc::UnboundedSender<String>,
    #[cfg_attr(not(test), allow(dead_code))]
    writer: thread::JoinHandle<()>,
}

impl TerminalTimerView {
    /// 표준 출력 뷰
    pub fn stdout() -> io::Result<Self> {
        Self::with_writer(Box::new(io::stdout()))
    }

    pub fn with_writer(mut out: Box<dyn Write + Send>) -> io::Result<Self> {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let writer = thread::Builder::new()
            .name("practrack-view".to_string())
            .spawn(move || {
                while let Some(text) = rx.blocking_recv() {
                    // 출력 실패는 타이머 동작에 영향을 주지 않는다
                    if out.write_all(text.as_bytes()).is_ok() {
                        let _ = out.flush();
                    }
                }
            })?;
        Ok(Self { tx, writer })
    }

    fn write(&self, text: String) {
        if self.tx.send(text).is_err() {
            debug!("출력 스레드 종료됨");
        }
    }

    /// 남은 출력을 모두 쓰고 출력 스레드 종료
    #[cfg(test)]
    fn close(self) {
        let Self { tx, writer } = self;
        drop(tx);
        let _ = writer.join();
    }
}

impl TimerView for TerminalTimerView {
    fn render_elapsed(&self, display: &str) {
        self.write(format!("\r⏱  {display} "));
    }

    fn set_controls(&self, controls: ControlStates) {
        self.write(format!("\n{}\n", control_hint(controls)));
    }
}

/// 콘솔 알림
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn show_notification(&self, title: &str, body: &str) -> Result<(), CoreError> {
        info!("알림: {title} - {body}");
        println!("\n✅ {body}");
        Ok(())
    }

    async fn show_error(&self, message: &str) -> Result<(), CoreError> {
        warn!("에러 알림: {message}");
        eprintln!("\n❌ {message}");
        Ok(())
    }
}
