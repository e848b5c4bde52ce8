//! Session persistence for the Pawdeck API token

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

use crate::client::AuthUser;
use crate::error::{ApiError, ApiResult};

/// Session information stored locally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub token: String,
    pub user_id: String,
    pub user_email: String,
    pub user_role: String,
    pub logged_in_at: DateTime<Utc>,
    /// Expiry is only known when the server communicates one; a session
    /// without it stays valid until logout or a 401.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionInfo {
    pub fn from_login(token: String, user: &AuthUser) -> Self {
        Self {
            token,
            user_id: user.id.clone(),
            user_email: user.email.clone(),
            user_role: user.role.clone(),
            logged_in_at: Utc::now(),
            expires_at: None,
        }
    }

    /// Check if the session is expired (with 5 minute buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at < Utc::now() + Duration::minutes(5),
            None => false,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.is_expired()
    }
}

/// Manages the stored session at `~/.pawdeck/auth.toml`
#[derive(Clone)]
pub struct AuthManager {
    config_path: PathBuf,
    session: Option<SessionInfo>,
}

impl AuthManager {
    pub fn new() -> ApiResult<Self> {
        let config_path = Self::config_file_path()?;
        Ok(Self {
            config_path,
            session: None,
        })
    }

    /// Use an explicit storage path instead of the home directory
    pub fn with_path(config_path: PathBuf) -> Self {
        Self {
            config_path,
            session: None,
        }
    }

    /// Load any existing session; absence is not an error.
    pub async fn init(&mut self) -> ApiResult<()> {
        if let Err(e) = self.load_session().await {
            tracing::debug!("Could not load existing session: {}", e);
        }
        Ok(())
    }

    fn config_file_path() -> ApiResult<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| ApiError::config("Could not determine home directory"))?;
        Ok(home_dir.join(".pawdeck").join("auth.toml"))
    }

    async fn load_session(&mut self) -> ApiResult<()> {
        if !self.config_path.exists() {
            return Err(ApiError::config("No stored session found"));
        }

        let content = fs::read_to_string(&self.config_path).await?;
        let session: SessionInfo = toml::from_str(&content)
            .map_err(|e| ApiError::config(format!("Invalid session file: {}", e)))?;

        self.session = Some(session);
        Ok(())
    }

    async fn save_session(&self, session: &SessionInfo) -> ApiResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let toml_content = toml::to_string_pretty(session)
            .map_err(|e| ApiError::config(format!("Failed to serialize session: {}", e)))?;

        fs::write(&self.config_path, toml_content).await?;
        Ok(())
    }

    /// Store a freshly issued session
    pub async fn set_session(&mut self, session: SessionInfo) -> ApiResult<()> {
        self.save_session(&session).await?;
        self.session = Some(session);
        Ok(())
    }

    /// Get a usable token, or tell the user to log in again
    pub fn valid_token(&self) -> ApiResult<String> {
        match &self.session {
            Some(session) if session.is_valid() => Ok(session.token.clone()),
            Some(_) => Err(ApiError::auth(
                "Session expired. Please run 'pawdeck login' again",
            )),
            None => Err(ApiError::auth(
                "Not logged in. Please run 'pawdeck login'",
            )),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session
            .as_ref()
            .map(|s| s.is_valid())
            .unwrap_or(false)
    }

    /// Identity of the stored session, if one is valid
    pub fn user_info(&self) -> Option<(&str, &str, &str)> {
        self.session
            .as_ref()
            .filter(|s| s.is_valid())
            .map(|s| (s.user_id.as_str(), s.user_email.as_str(), s.user_role.as_str()))
    }

    /// Remove the stored session (logout)
    pub async fn logout(&mut self) -> ApiResult<()> {
        if self.config_path.exists() {
            fs::remove_file(&self.config_path).await?;
        }
        self.session = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_user() -> AuthUser {
        AuthUser {
            id: "1".to_string(),
            email: "admin@pawdeck.io".to_string(),
            role: "Admin".to_string(),
        }
    }

    #[tokio::test]
    async fn session_round_trips_through_the_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auth.toml");

        let mut manager = AuthManager::with_path(path.clone());
        let session = SessionInfo::from_login("jwt-token".to_string(), &sample_user());
        manager.set_session(session).await.unwrap();

        let mut reloaded = AuthManager::with_path(path);
        reloaded.init().await.unwrap();
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.valid_token().unwrap(), "jwt-token");
        let (id, email, role) = reloaded.user_info().unwrap();
        assert_eq!(id, "1");
        assert_eq!(email, "admin@pawdeck.io");
        assert_eq!(role, "Admin");
    }

    #[tokio::test]
    async fn logout_deletes_the_stored_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auth.toml");

        let mut manager = AuthManager::with_path(path.clone());
        let session = SessionInfo::from_login("jwt-token".to_string(), &sample_user());
        manager.set_session(session).await.unwrap();
        assert!(path.exists());

        manager.logout().await.unwrap();
        assert!(!path.exists());
        assert!(!manager.is_authenticated());
        assert!(manager.valid_token().is_err());
    }

    #[tokio::test]
    async fn init_without_a_session_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let mut manager = AuthManager::with_path(dir.path().join("auth.toml"));
        manager.init().await.unwrap();
        assert!(!manager.is_authenticated());
    }

    #[test]
    fn session_near_expiry_counts_as_expired() {
        let mut session = SessionInfo::from_login("t".to_string(), &sample_user());
        assert!(session.is_valid());

        session.expires_at = Some(Utc::now() + Duration::minutes(2));
        assert!(session.is_expired());

        session.expires_at = Some(Utc::now() + Duration::hours(1));
        assert!(session.is_valid());
    }
}
