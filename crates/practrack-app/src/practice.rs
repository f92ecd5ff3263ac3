//! 대화형 연습 모드.
//!
//! 표준 입력 한 줄이 컨트롤 하나다. 종료 시 측정 중인 세션은 정지해 제출하고,
//! 남은 제출이 끝날 때까지 기다린다.

use anyhow::{bail, Result};
use practrack_core::models::time_entry::CourseId;
use practrack_core::models::timer::TimerState;
use practrack_core::ports::api_client::ApiClient;
use practrack_core::ports::timer_view::TimerView;
use practrack_timer::events::{TimerEvent, TimerEvents};
use practrack_timer::registry::TimerRegistry;
use practrack_timer::submitter::{PendingSubmission, SubmissionOutcome};
use practrack_timer::timer::{SessionTimer, StopOutcome};
use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info, warn};

use crate::app::AppContext;
use crate::terminal::{control_hint, ConsoleNotifier, TerminalTimerView};

/// 연습 모드 입력
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeCommand {
    Start,
    Stop,
    Restart,
    Status,
    Help,
    Quit,
}

impl PracticeCommand {
    /// 입력 한 줄 해석. 빈 줄/알 수 없는 입력은 None
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "start" | "s" => Some(Self::Start),
            "stop" | "x" => Some(Self::Stop),
            "restart" | "r" => Some(Self::Restart),
            "status" | "t" => Some(Self::Status),
            "help" | "h" | "?" => Some(Self::Help),
            "quit" | "q" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// 루프 진행 여부
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// 한 코스의 연습 세션
pub struct PracticeSession {
    timer: Arc<SessionTimer>,
    pending: Vec<PendingSubmission>,
}

impl PracticeSession {
    pub fn new(timer: Arc<SessionTimer>) -> Self {
        Self {
            timer,
            pending: Vec::new(),
        }
    }

    pub fn timer(&self) -> &Arc<SessionTimer> {
        &self.timer
    }

    /// 컨트롤 하나 적용
    pub fn apply(&mut self, command: PracticeCommand) -> bool {
        match command {
            PracticeCommand::Start => self.timer.start(),
            PracticeCommand::Stop => match self.timer.stop() {
                StopOutcome::Submitted(pending) => {
                    self.pending.retain(|p| !p.is_finished());
                    self.pending.push(pending);
                    true
                }
                StopOutcome::Discarded => {
                    println!("\n0초 세션은 저장하지 않습니다");
                    true
                }
                StopOutcome::NotRunning => false,
            },
            PracticeCommand::Restart => self.timer.restart(),
            PracticeCommand::Status => {
                println!(
                    "\n{} {} {}",
                    self.timer.state(),
                    self.timer.display(),
                    control_hint(self.timer.controls())
                );
                true
            }
            PracticeCommand::Help => {
                print_help();
                true
            }
            PracticeCommand::Quit => true,
        }
    }

    /// 진행 중인 세션 정지 후 남은 제출 대기
    pub async fn finish(&mut self) -> Vec<SubmissionOutcome> {
        if self.timer.state() == TimerState::Running {
            info!("종료 전 세션 정지: course={}", self.timer.course_id());
            self.apply(PracticeCommand::Stop);
        }

        let mut outcomes = Vec::with_capacity(self.pending.len());
        for pending in self.pending.drain(..) {
            outcomes.push(pending.outcome().await);
        }
        outcomes
    }
}

fn print_help() {
    println!();
    println!("  start   (s)  측정 시작");
    println!("  stop    (x)  정지 후 기록 저장");
    println!("  restart (r)  기록 없이 초기화");
    println!("  status  (t)  현재 상태");
    println!("  quit    (q)  종료");
}

/// 연습 모드 실행
pub async fn run(app: &AppContext, course_id: CourseId, mut shutdown: watch::Receiver<bool>) -> Result<()> {
    if !app.session.is_authenticated().await {
        bail!("로그인이 필요합니다: practrack login");
    }

    match app.api.list_courses().await {
        Ok(courses) => match courses.iter().find(|c| c.id == course_id) {
            Some(course) => println!("🎵 {}", course.name),
            None => bail!("배정되지 않은 코스입니다: {course_id}"),
        },
        Err(e) => warn!("코스 목록 조회 실패, 확인 없이 진행: {e}"),
    }

    let events = TimerEvents::default();
    let mut event_rx = events.subscribe();
    let submitter = app.submitter(Arc::new(ConsoleNotifier), events);
    let registry = TimerRegistry::new(submitter).with_tick_interval(app.config.tick_interval());
    let view: Arc<dyn TimerView> = Arc::new(TerminalTimerView::stdout()?);
    let mut session = PracticeSession::new(registry.timer_for(course_id, view));
    print_help();

    let mut lines = spawn_line_reader(io::BufReader::new(io::stdin()))?;
    loop {
        let flow = tokio::select! {
            line = lines.recv() => match line {
                Some(line) => handle_line(&mut session, &line),
                None => Flow::Exit,
            },
            event = event_rx.recv() => match event {
                Ok(event) => handle_event(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    debug!("이벤트 {n}개 누락");
                    Flow::Continue
                }
                Err(broadcast::error::RecvError::Closed) => Flow::Exit,
            },
            _ = shutdown.changed() => Flow::Exit,
        };

        if flow == Flow::Exit {
            break;
        }
    }

    let outcomes = session.finish().await;
    registry.release(course_id);
    debug!("연습 모드 종료: 제출 {}건", outcomes.len());

    let reauth_required = outcomes
        .iter()
        .any(|o| matches!(o, SubmissionOutcome::ReauthRequired { .. }))
        || !app.session.is_authenticated().await;
    if reauth_required {
        if let Err(e) = app.tokens.logout().await {
            warn!("세션 파일 정리 실패: {e}");
        }
        bail!("세션이 만료되었습니다. 다시 로그인하세요");
    }
    Ok(())
}

/// 입력 한 줄씩 채널로 넘기는 전용 스레드
///
/// 블로킹 읽기는 취소할 수 없어서 런타임 밖에서 돌린다. 스레드는 join하지 않으며
/// EOF, 읽기 오류, 수신기 drop 중 하나로 끝난다.
fn spawn_line_reader<R>(input: R) -> io::Result<mpsc::Receiver<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);
    thread::Builder::new()
        .name("practrack-stdin".to_string())
        .spawn(move || {
            for line in input.lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("입력 읽기 실패: {e}");
                        break;
                    }
                }
            }
        })?;
    Ok(rx)
}

fn handle_line(session: &mut PracticeSession, line: &str) -> Flow {
    match PracticeCommand::parse(line) {
        Some(PracticeCommand::Quit) => Flow::Exit,
        Some(command) => {
            if !session.apply(command) {
                debug!("무시된 입력: {command:?} (state={})", session.timer().state());
            }
            Flow::Continue
        }
        None => {
            if !line.trim().is_empty() {
                println!("\n알 수 없는 입력: {} (help)", line.trim());
            }
            Flow::Continue
        }
    }
}

fn handle_event(event: TimerEvent) -> Flow {
    match event {
        TimerEvent::ReauthRequired { message } => {
            warn!("재로그인 필요: {message}");
            Flow::Exit
        }
        other => {
            debug!("{other:?}");
            Flow::Continue
        }
    }
}
