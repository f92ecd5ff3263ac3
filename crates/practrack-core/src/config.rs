//! 애플리케이션 설정 구조체.
//!
//! 서버 URL, 요청 타임아웃, 타이머 틱 주기, 세션 보존 여부 등
//! 런타임 설정을 정의한다. `ConfigManager`를 통해 JSON 파일에서 로드.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 서버 연결 설정
    pub server: ServerConfig,
    /// 연습 타이머 설정
    #[serde(default)]
    pub timer: TimerConfig,
    /// 로그인 세션 설정
    #[serde(default)]
    pub session: SessionConfig,
}

/// 서버 연결 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// API 서버 기본 URL (예: "https://practice.example.com")
    pub base_url: String,
    /// 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// 조회 요청 재시도 횟수 (시간 기록 전송은 항상 1회)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

// ============================================================
// 타이머 설정
// ============================================================

/// 연습 타이머 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// 표시 갱신 주기 (밀리초)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

// ============================================================
// 세션 설정
// ============================================================

/// 로그인 세션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 로그인 토큰을 디스크에 보존할지 여부
    #[serde(default = "default_true")]
    pub persist: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { persist: true }
    }
}

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                base_url: "http://localhost:8000".to_string(),
                request_timeout_ms: default_request_timeout_ms(),
                max_retries: default_max_retries(),
            },
            timer: TimerConfig::default(),
            session: SessionConfig::default(),
        }
    }

    /// 서버 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.server.request_timeout_ms)
    }

    /// 타이머 틱 주기를 Duration으로 반환 (0이면 1ms로 보정)
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.timer.tick_interval_ms.max(1))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_true() -> bool {
    true
}

fn default_request_timeout_ms() -> u64 {
    30_000
}
fn default_max_retries() -> u32 {
    3
}
fn default_tick_interval_ms() -> u64 {
    1_000
}
