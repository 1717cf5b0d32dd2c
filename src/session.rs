//! Authenticated session shared by the API client, services and controllers.
//!
//! The session is the only owner of the bearer token. Persistence goes through
//! a [`SessionStore`] and redirects through a [`Navigator`], so both can be
//! swapped for in-memory fakes in tests.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::access::{CapabilitySet, Role, Route};
use crate::domain::auth::LoginResponse;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored session is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Session lock poisoned")]
    Poisoned,
}

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    pub user_id: i32,
    pub name: String,
    pub role_id: i32,
}

impl SessionUser {
    pub fn role(&self) -> Option<Role> {
        Role::try_from(self.role_id).ok()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StoredSession {
    pub token: String,
    pub user: SessionUser,
}

impl From<LoginResponse> for StoredSession {
    fn from(response: LoginResponse) -> Self {
        Self {
            token: response.token,
            user: SessionUser {
                user_id: response.user_id,
                name: response.name,
                role_id: response.role_id,
            },
        }
    }
}

#[cfg_attr(any(test, feature = "test-mocks"), mockall::automock)]
pub trait SessionStore: Send + Sync {
    fn load(&self) -> SessionResult<Option<StoredSession>>;
    fn save(&self, session: &StoredSession) -> SessionResult<()>;
    fn clear(&self) -> SessionResult<()>;
}

#[cfg_attr(any(test, feature = "test-mocks"), mockall::automock)]
pub trait Navigator: Send + Sync {
    fn redirect(&self, route: Route);
}

#[derive(Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<StoredSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: StoredSession) -> Self {
        Self {
            inner: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> SessionResult<Option<StoredSession>> {
        let guard = self.inner.read().map_err(|_| SessionError::Poisoned)?;
        Ok(guard.clone())
    }

    fn save(&self, session: &StoredSession) -> SessionResult<()> {
        let mut guard = self.inner.write().map_err(|_| SessionError::Poisoned)?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        let mut guard = self.inner.write().map_err(|_| SessionError::Poisoned)?;
        *guard = None;
        Ok(())
    }
}

/// Session persisted as a JSON file between CLI invocations.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> SessionResult<Option<StoredSession>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, session: &StoredSession) -> SessionResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)?;

        // The file holds the bearer token: owner read/write only.
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(raw.as_bytes())?;
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Navigator for front-ends without a router: redirects are only logged.
#[derive(Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect(&self, route: Route) {
        log::info!("Redirecting to {route}");
    }
}

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    /// In-memory session that only logs redirects.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()), Arc::new(LogNavigator))
    }

    fn current(&self) -> Option<StoredSession> {
        match self.store.load() {
            Ok(session) => session,
            Err(err) => {
                log::error!("Failed to load session: {err}");
                None
            }
        }
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.current().map(|s| s.user)
    }

    pub fn role(&self) -> Option<Role> {
        self.user().and_then(|u| u.role())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Capabilities of the signed-in role; empty when signed out or the role is unknown.
    pub fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::for_role(self.user().map(|u| u.role_id))
    }

    pub fn sign_in(&self, response: LoginResponse) -> SessionResult<StoredSession> {
        let session = StoredSession::from(response);
        self.store.save(&session)?;
        log::info!(
            "Signed in user {} with role {}",
            session.user.user_id,
            Role::label_for(Some(session.user.role_id))
        );
        Ok(session)
    }

    pub fn sign_out(&self) -> SessionResult<()> {
        self.store.clear()
    }

    /// Checks access to `route`, redirecting to login when a token is required
    /// and missing.
    pub fn guard(&self, route: Route) -> bool {
        if route.requires_auth() && !self.is_authenticated() {
            self.navigator.redirect(Route::Login);
            return false;
        }
        true
    }

    /// Called for every 401: drops the stored session and sends the user to login.
    pub fn on_unauthorized(&self) {
        if let Err(err) = self.store.clear() {
            log::error!("Failed to clear session: {err}");
        }
        self.navigator.redirect(Route::Login);
    }
}
