//! 설정 및 DI 와이어링 통합 테스트.
//!
//! AppConfig → 어댑터 생성 검증.

use practrack_core::config::AppConfig;
use practrack_core::config_manager::ConfigManager;
use practrack_core::models::session::SessionContext;
use practrack_core::models::time_entry::CourseId;
use practrack_core::models::timer::TimerState;
use practrack_core::ports::api_client::TimeTrackingApi;
use practrack_core::ports::timer_view::NullTimerView;
use practrack_network::auth::TokenManager;
use practrack_network::http_client::HttpApiClient;
use practrack_timer::registry::TimerRegistry;
use practrack_timer::submitter::TimeEntrySubmitter;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn config_defaults_are_valid() {
    let config = AppConfig::default_config();

    // 서버 설정
    assert!(!config.server.base_url.is_empty());
    assert!(config.server.request_timeout_ms > 0);

    // 타이머 설정
    assert_eq!(config.timer.tick_interval_ms, 1000);

    // 세션 보존
    assert!(config.session.persist);
}

#[test]
fn config_duration_conversions() {
    let config = AppConfig::default_config();

    let timeout = config.request_timeout();
    assert_eq!(timeout.as_millis(), config.server.request_timeout_ms as u128);

    let tick = config.tick_interval();
    assert_eq!(tick, Duration::from_secs(1));
}

#[test]
fn config_serde_roundtrip() {
    let mut config = AppConfig::default_config();
    config.server.base_url = "https://practice.example.com".to_string();
    config.timer.tick_interval_ms = 250;

    let json = serde_json::to_string(&config).unwrap();
    let deserialized: AppConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(deserialized.server.base_url, "https://practice.example.com");
    assert_eq!(deserialized.timer.tick_interval_ms, 250);
    assert_eq!(deserialized.server.max_retries, config.server.max_retries);
}

#[test]
fn config_manager_persists_updates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let manager = ConfigManager::with_path(path.clone()).unwrap();
    manager
        .update_with(|c| c.server.base_url = "http://10.0.0.5:8000".to_string())
        .unwrap();

    let reopened = ConfigManager::with_path(path).unwrap();
    assert_eq!(reopened.get().server.base_url, "http://10.0.0.5:8000");
}

#[tokio::test]
async fn all_adapters_instantiate_from_config() {
    let config = AppConfig::default_config();
    let context = SessionContext::new();

    // 인증
    let tokens = TokenManager::new(&config.server.base_url, context.clone());
    assert!(!tokens.is_authenticated().await);

    // HTTP 클라이언트 → 포트
    let api: Arc<dyn TimeTrackingApi> = Arc::new(
        HttpApiClient::new(&config.server.base_url, context.clone(), config.request_timeout())
            .unwrap(),
    );

    // 제출기 + 레지스트리
    let submitter = Arc::new(TimeEntrySubmitter::new(api, context));
    let registry = TimerRegistry::new(submitter).with_tick_interval(config.tick_interval());

    let timer = registry.timer_for(CourseId(1), Arc::new(NullTimerView));
    assert_eq!(timer.state(), TimerState::Idle);
    assert_eq!(timer.display(), "00:00:00");
}
