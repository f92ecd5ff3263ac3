//! # practrack
//!
//! 연습 시간 기록 클라이언트 바이너리 진입점.
//! 설정 로드, 어댑터 와이어링, 서브커맨드 디스패치, 라이프사이클 관리.

mod app;
mod commands;
mod lifecycle;
mod practice;
mod terminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use practrack_core::config::AppConfig;
use practrack_core::config_manager::ConfigManager;
use practrack_core::models::time_entry::CourseId;
use practrack_network::auth::NewAccount;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::lifecycle::LifecycleManager;

/// practrack: 코스별 연습 시간 측정 및 기록
#[derive(Parser, Debug)]
#[command(name = "practrack")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 서버 URL 지정 (기본: 설정 파일 또는 http://localhost:8000)
    #[arg(long, short = 's', global = true)]
    server: Option<String>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "warn", global = true)]
    log_level: String,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.json)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 로그인 (미지정 시 PRACTRACK_EMAIL / PRACTRACK_PASSWORD 사용)
    Login {
        #[arg(long, short = 'e')]
        email: Option<String>,
        #[arg(long, short = 'p')]
        password: Option<String>,
    },
    /// 학생 계정 생성
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long, short = 'e')]
        email: String,
        #[arg(long, short = 'p')]
        password: String,
    },
    /// 로그아웃 (저장된 세션 삭제)
    Logout,
    /// 현재 로그인 사용자
    Whoami,
    /// 배정된 코스 목록
    Courses,
    /// 코스별 누적 연습 시간 (기본: 본인)
    Stats {
        student_id: Option<i64>,
    },
    /// 연습 타이머 실행
    Practice {
        course_id: i64,
    },
}

/// 설정 로드 (실패 시 기본 설정)
fn load_config(path: Option<PathBuf>) -> AppConfig {
    let manager = match path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };

    match manager {
        Ok(manager) => {
            info!("설정 파일: {}", manager.config_path().display());
            manager.get()
        }
        Err(e) => {
            warn!("설정 로드 실패, 기본 설정 사용: {e}");
            AppConfig::default_config()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "practrack={},practrack_app={},practrack_core={},practrack_network={},practrack_timer={}",
        args.log_level, args.log_level, args.log_level, args.log_level, args.log_level
    );
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    let mut config = load_config(args.config);
    if let Some(server_url) = args.server {
        config.server.base_url = server_url;
    }
    info!("서버: {}", config.server.base_url);

    let app = AppContext::build(config).await?;

    match args.command {
        Command::Login { email, password } => commands::login(&app, email, password).await,
        Command::Register {
            first_name,
            last_name,
            email,
            password,
        } => {
            let account = NewAccount {
                first_name,
                last_name,
                email,
                password,
            };
            commands::register(&app, account).await
        }
        Command::Logout => commands::logout(&app).await,
        Command::Whoami => commands::whoami(&app).await,
        Command::Courses => commands::courses(&app).await,
        Command::Stats { student_id } => commands::stats(&app, student_id).await,
        Command::Practice { course_id } => {
            let lifecycle = Arc::new(LifecycleManager::new());
            let shutdown_rx = lifecycle.subscribe();
            let signals = lifecycle.clone();
            let signal_task = tokio::spawn(async move {
                signals.wait_for_signal().await;
            });

            let result = practice::run(&app, CourseId(course_id), shutdown_rx).await;
            signal_task.abort();
            info!("practrack 종료");
            result
        }
    }
}
