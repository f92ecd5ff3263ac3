//! 어댑터 와이어링.
//!
//! `AppConfig` 하나로 인증 컨텍스트, 토큰 매니저, HTTP 클라이언트를 만든다.
//! 모든 컴포넌트가 같은 `SessionContext`를 공유한다.

use anyhow::{Context, Result};
use practrack_core::config::AppConfig;
use practrack_core::models::session::SessionContext;
use practrack_core::ports::notifier::Notifier;
use practrack_core::session_store::SessionStore;
use practrack_network::auth::TokenManager;
use practrack_network::http_client::HttpApiClient;
use practrack_timer::events::TimerEvents;
use practrack_timer::submitter::TimeEntrySubmitter;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 와이어링된 앱 컨텍스트
pub struct AppContext {
    pub config: AppConfig,
    pub session: SessionContext,
    pub tokens: TokenManager,
    pub api: Arc<HttpApiClient>,
}

impl AppContext {
    /// 설정으로 어댑터 생성 후 보존된 세션 복원
    pub async fn build(config: AppConfig) -> Result<Self> {
        Self::build_with_store(config, None).await
    }

    /// 세션 파일 위치를 지정해 생성 (`None`이면 기본 위치)
    pub async fn build_with_store(config: AppConfig, store: Option<SessionStore>) -> Result<Self> {
        let session = SessionContext::new();
        let mut tokens = TokenManager::new(&config.server.base_url, session.clone());

        if config.session.persist {
            let store = match store {
                Some(store) => Some(store),
                None => SessionStore::default_location()
                    .map_err(|e| warn!("세션 저장 위치 확인 실패, 세션을 보존하지 않음: {e}"))
                    .ok(),
            };
            if let Some(store) = store {
                debug!("세션 파일: {}", store.path().display());
                tokens = tokens.with_store(store);
            }
        }

        match tokens.restore().await {
            Ok(true) => info!("저장된 세션 복원"),
            Ok(false) => debug!("저장된 세션 없음"),
            Err(e) => warn!("세션 복원 실패: {e}"),
        }

        let api = HttpApiClient::new(
            &config.server.base_url,
            session.clone(),
            config.request_timeout(),
        )
        .context("HTTP 클라이언트 생성 실패")?
        .with_max_retries(config.server.max_retries);

        Ok(Self {
            config,
            session,
            tokens,
            api: Arc::new(api),
        })
    }

    /// 연습 시간 제출기
    pub fn submitter(&self, notifier: Arc<dyn Notifier>, events: TimerEvents) -> Arc<TimeEntrySubmitter> {
        Arc::new(
            TimeEntrySubmitter::new(self.api.clone(), self.session.clone())
                .with_notifier(notifier)
                .with_events(events),
        )
    }
}
