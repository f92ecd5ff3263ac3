//! 로그인 세션 파일 저장소.
//!
//! 실행 간 로그인 상태를 유지하기 위해 `AuthSession`을 JSON 파일로 보관한다.

use crate::config_manager::ConfigManager;
use crate::error::CoreError;
use crate::models::session::AuthSession;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 세션 파일 이름
const SESSION_FILE_NAME: &str = "session.json";

/// 로그인 세션 저장소
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// 지정 경로 저장소
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 플랫폼 데이터 디렉토리의 기본 저장소
    pub fn default_location() -> Result<Self, CoreError> {
        Ok(Self::new(ConfigManager::data_dir()?.join(SESSION_FILE_NAME)))
    }

    /// 세션 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 저장된 세션 로드
    ///
    /// 파일이 없으면 `None`. 파일이 손상됐으면 경고 후 삭제하고 `None`.
    pub fn load(&self) -> Result<Option<AuthSession>, CoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<AuthSession>(&content) {
            Ok(session) => {
                debug!("세션 로드: user_id={}", session.user.id);
                Ok(Some(session))
            }
            Err(e) => {
                warn!("세션 파일 손상, 삭제: {}: {e}", self.path.display());
                self.clear()?;
                Ok(None)
            }
        }
    }

    /// 세션 저장
    pub fn save(&self, session: &AuthSession) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, content)?;
        restrict_permissions(&self.path)?;

        debug!("세션 저장: {}", self.path.display());
        Ok(())
    }

    /// 세션 파일 삭제 (없으면 no-op)
    pub fn clear(&self) -> Result<(), CoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("세션 파일 삭제: {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// 토큰 파일은 소유자만 읽도록 제한
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), CoreError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), CoreError> {
    Ok(())
}
