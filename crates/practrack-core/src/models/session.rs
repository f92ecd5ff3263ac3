//! 인증 세션 모델.
//!
//! 로그인한 사용자와 bearer 토큰을 명시적인 컨텍스트 객체로 보관한다.
//! 토큰이 필요한 컴포넌트는 전역 상태 대신 `SessionContext`를 주입받는다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CoreError;

/// 사용자 프로필 (로그인 응답의 `user`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// 사용자 ID (학생 ID)
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// 관리자 여부
    #[serde(default)]
    pub is_admin: bool,
}

impl UserProfile {
    /// 표시용 이름
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// 인증된 세션: 토큰 + 사용자
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// bearer 액세스 토큰
    pub access_token: String,
    /// 토큰 종류 (서버는 "bearer"를 반환)
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// 로그인 사용자
    pub user: UserProfile,
    /// 토큰 수령 시각
    #[serde(default = "Utc::now")]
    pub issued_at: DateTime<Utc>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// 공유 인증 컨텍스트
///
/// 복제해도 같은 상태를 가리킨다. 한 컴포넌트에서 `clear()`하면
/// 다른 모든 보유자가 미인증 상태를 보게 된다.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<AuthSession>>>,
}

impl SessionContext {
    /// 미인증 컨텍스트 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 인증된 세션으로 컨텍스트 생성
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(session))),
        }
    }

    /// 현재 세션 (복제본)
    pub async fn current(&self) -> Option<AuthSession> {
        self.inner.read().await.clone()
    }

    /// 현재 사용자
    pub async fn user(&self) -> Option<UserProfile> {
        self.inner.read().await.as_ref().map(|s| s.user.clone())
    }

    /// bearer 토큰 반환, 미인증이면 `CoreError::Auth`
    pub async fn token(&self) -> Result<String, CoreError> {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
            .ok_or_else(|| CoreError::Auth("인증되지 않음".to_string()))
    }

    /// 세션 설정 (로그인)
    pub async fn set(&self, session: AuthSession) {
        *self.inner.write().await = Some(session);
    }

    /// 세션 제거 (로그아웃/토큰 만료). 제거할 세션이 있었으면 true
    pub async fn clear(&self) -> bool {
        self.inner.write().await.take().is_some()
    }

    /// 인증 여부
    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> AuthSession {
        AuthSession {
            access_token: "jwt_abc".to_string(),
            token_type: "bearer".to_string(),
            user: UserProfile {
                id: 5,
                first_name: "Mina".to_string(),
                last_name: "Park".to_string(),
                email: "mina@example.com".to_string(),
                is_admin: false,
            },
            issued_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn unauthenticated_token_fails() {
        let ctx = SessionContext::new();
        assert!(!ctx.is_authenticated().await);
        let err = ctx.token().await.unwrap_err();
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let ctx = SessionContext::new();
        let other = ctx.clone();
        ctx.set(sample_session()).await;

        assert_eq!(other.token().await.unwrap(), "jwt_abc");
        assert_eq!(other.user().await.unwrap().id, 5);

        assert!(other.clear().await);
        assert!(!ctx.is_authenticated().await);
        assert!(!ctx.clear().await);
    }

    #[test]
    fn login_response_shape_deserializes() {
        let json = r#"{
            "access_token": "t",
            "token_type": "bearer",
            "user": {"id": 1, "first_name": "A", "last_name": "B", "email": "a@b.c", "is_admin": true}
        }"#;
        let session: AuthSession = serde_json::from_str(json).unwrap();
        assert!(session.user.is_admin);
        assert_eq!(session.user.display_name(), "A B");
    }
}
