use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEMO_AVATAR: &str =
    "https://images.unsplash.com/photo-1633332755192-727a05c4013d?q=80&w=200&auto=format&fit=crop";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("email and password are both required")]
    InvalidCredentials,
    #[error("no administrator is signed in")]
    NotSignedIn,
    #[error("failed to write session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
    Manager,
}

impl AdminRole {
    pub fn label(self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "super_admin",
            AdminRole::Admin => "Administrator",
            AdminRole::Manager => "manager",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: AdminRole,
    pub avatar: Option<String>,
    pub last_login: DateTime<Utc>,
}

/// Fields an administrator may change on their own profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct SessionState {
    user: Option<AdminUser>,
    token: Option<String>,
}

/// The signed-in administrator, backed by a JSON file. Created once at
/// startup and handed to whatever needs to know who is signed in.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    state: SessionState,
}

impl SessionStore {
    /// Reads the session file. When there is none, `demo` decides between
    /// the built-in demo administrator and a signed-out session. A file that
    /// cannot be read or parsed is treated as signed out.
    pub fn load(path: impl Into<PathBuf>, demo: bool, now: DateTime<Utc>) -> Self {
        let path = path.into();

        let state = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<SessionState>(&contents) {
                Ok(state) => {
                    debug!("loaded session from {}", path.display());
                    state
                }
                Err(err) => {
                    warn!("ignoring unreadable session file {}: {err}", path.display());
                    SessionState::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                if demo {
                    debug!("no session file at {}, using demo administrator", path.display());
                    SessionState {
                        user: Some(demo_admin("admin@example.com", now)),
                        token: Some("demo-token-12345".to_string()),
                    }
                } else {
                    SessionState::default()
                }
            }
            Err(err) => {
                warn!("cannot read session file {}: {err}", path.display());
                SessionState::default()
            }
        };

        Self { path, state }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.user.is_some()
    }

    pub fn current_user(&self) -> Option<&AdminUser> {
        self.state.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    /// Any non-empty email/password pair is accepted; there is no backend
    /// to check them against.
    pub fn login(
        &mut self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<&AdminUser, SessionError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(SessionError::InvalidCredentials);
        }

        self.state = SessionState {
            user: Some(demo_admin(email.trim(), now)),
            token: Some(Uuid::new_v4().to_string()),
        };
        self.save()?;
        info!("signed in as {}", email.trim());

        self.current_user().ok_or(SessionError::NotSignedIn)
    }

    /// Clears the session and stores the signed-out state, so the next
    /// start does not fall back to the demo administrator.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        if let Some(user) = self.state.user.take() {
            info!("signed out {}", user.email);
        }
        self.state = SessionState::default();
        self.save()
    }

    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<&AdminUser, SessionError> {
        let user = self.state.user.as_mut().ok_or(SessionError::NotSignedIn)?;

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(avatar) = update.avatar {
            user.avatar = Some(avatar);
        }

        self.save()?;
        self.current_user().ok_or(SessionError::NotSignedIn)
    }

    fn save(&self) -> Result<(), SessionError> {
        let encoded = serde_json::to_string_pretty(&self.state)?;
        std::fs::write(&self.path, encoded).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

fn demo_admin(email: &str, now: DateTime<Utc>) -> AdminUser {
    AdminUser {
        id: "admin-001".to_string(),
        name: "Admin User".to_string(),
        email: email.to_string(),
        role: AdminRole::Admin,
        avatar: Some(DEMO_AVATAR.to_string()),
        last_login: now,
    }
}
