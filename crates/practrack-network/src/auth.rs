//! 인증 토큰 관리.
//!
//! 서버 로그인/회원가입, 로그아웃, 디스크에 보존된 세션 복원을 담당한다.
//! 토큰은 주입받은 `SessionContext`에 보관하며 전역 상태를 쓰지 않는다.

use chrono::Utc;
use practrack_core::error::CoreError;
use practrack_core::models::session::{AuthSession, SessionContext, UserProfile};
use practrack_core::session_store::SessionStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::response::check_response;

/// 서버 응답: 로그인
#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    user: UserProfile,
}

/// 회원가입 요청
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// 토큰 매니저: 로그인/로그아웃/세션 복원
#[derive(Clone)]
pub struct TokenManager {
    base_url: String,
    client: reqwest::Client,
    context: SessionContext,
    store: Option<SessionStore>,
}

impl TokenManager {
    /// 새 토큰 매니저 생성
    pub fn new(base_url: &str, context: SessionContext) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            context,
            store: None,
        }
    }

    /// 로그인 세션을 파일에 보존
    pub fn with_store(mut self, store: SessionStore) -> Self {
        self.store = Some(store);
        self
    }

    /// 공유 인증 컨텍스트
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// 이메일/비밀번호 로그인 → 토큰 획득
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, CoreError> {
        let url = format!("{}/api/login", self.base_url);
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("로그인 요청 실패: {e}")))?;

        // 로그인 단계의 실패는 모두 자격증명 문제로 취급
        let resp = check_response(resp).await.map_err(|e| match e {
            CoreError::Network(_) | CoreError::ServiceUnavailable(_) => e,
            other => CoreError::Auth(format!("로그인 실패: {other}")),
        })?;

        let login: LoginResponse = resp
            .json()
            .await
            .map_err(|e| CoreError::Auth(format!("토큰 파싱 실패: {e}")))?;

        if login.access_token.is_empty() {
            return Err(CoreError::Auth("로그인 실패: 빈 토큰".to_string()));
        }

        let session = AuthSession {
            access_token: login.access_token,
            token_type: login.token_type.unwrap_or_else(|| "bearer".to_string()),
            user: login.user,
            issued_at: Utc::now(),
        };
        let user = session.user.clone();

        if let Some(store) = &self.store {
            if let Err(e) = store.save(&session) {
                warn!("세션 저장 실패: {e}");
            }
        }
        self.context.set(session).await;

        info!("로그인 성공: user_id={}, admin={}", user.id, user.is_admin);
        Ok(user)
    }

    /// 회원가입 (`POST /api/register`). 가입 후 별도로 로그인해야 한다.
    pub async fn register(&self, account: &NewAccount) -> Result<(), CoreError> {
        if account.password.is_empty() {
            return Err(CoreError::Validation {
                field: "password".to_string(),
                message: "비밀번호가 비어 있음".to_string(),
            });
        }

        let url = format!("{}/api/register", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(account)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("회원가입 요청 실패: {e}")))?;

        check_response(resp).await?;
        debug!("회원가입 완료: {}", account.email);
        Ok(())
    }

    /// 로그아웃: 컨텍스트와 보존된 세션 파일 제거
    ///
    /// 서버에 로그아웃 엔드포인트가 없으므로 로컬 상태만 지운다.
    pub async fn logout(&self) -> Result<bool, CoreError> {
        let had_session = self.context.clear().await;
        if let Some(store) = &self.store {
            store.clear()?;
        }
        debug!("로그아웃 완료");
        Ok(had_session)
    }

    /// 보존된 세션을 컨텍스트로 복원. 복원했으면 true
    pub async fn restore(&self) -> Result<bool, CoreError> {
        let Some(store) = &self.store else {
            return Ok(false);
        };

        match store.load()? {
            Some(session) => {
                debug!("세션 복원: user_id={}", session.user.id);
                self.context.set(session).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// 현재 액세스 토큰
    pub async fn get_token(&self) -> Result<String, CoreError> {
        self.context.token().await
    }

    /// 현재 인증 상태 확인
    pub async fn is_authenticated(&self) -> bool {
        self.context.is_authenticated().await
    }
}
