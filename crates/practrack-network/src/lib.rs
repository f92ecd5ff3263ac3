//! # practrack-network
//!
//! REST API 네트워크 어댑터.
//! 로그인/회원가입/로그아웃, 코스 및 연습 통계 조회, 연습 시간 기록 전송을 담당하며
//! 모든 인증 요청에 bearer 토큰을 주입한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use practrack_core::models::session::SessionContext;
//! use practrack_network::auth::TokenManager;
//! use practrack_network::http_client::HttpApiClient;
//!
//! let context = SessionContext::new();
//! let auth = TokenManager::new("http://localhost:8000", context.clone());
//! auth.login("student@example.com", "secret").await?;
//! let api = HttpApiClient::new("http://localhost:8000", context, timeout)?;
//! let courses = api.list_courses().await?;
//! ```

pub mod auth;
pub mod http_client;
mod response;
