//! Session-based authentication for staff operations
//!
//! The [`SessionGate`] owns every live [`Session`]. Staff log in with
//! credentials checked by a [`CredentialVerifier`], receive an opaque
//! [`SessionToken`], and present that token on each mutating call. Sessions
//! end on logout or when the [`SessionPolicy`] idle or absolute limit is hit,
//! measured against the injected [`Clock`].

mod credentials;
mod session;

pub use credentials::{Argon2Verifier, CredentialVerifier, hash_password};
pub use session::{Session, SessionPolicy, SessionToken};

#[cfg(test)]
pub use credentials::MockCredentialVerifier;

use crate::core::Clock;
use crate::error::{HelpdeskError, Result};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Issues, checks, and destroys sessions
pub struct SessionGate {
    verifier: Box<dyn CredentialVerifier>,
    clock: Arc<dyn Clock>,
    policy: SessionPolicy,
    sessions: RwLock<HashMap<SessionToken, Session>>,
}

impl std::fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGate")
            .field("verifier", &"Box<dyn CredentialVerifier>")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl SessionGate {
    pub fn new(
        verifier: impl CredentialVerifier + 'static,
        clock: Arc<dyn Clock>,
        policy: SessionPolicy,
    ) -> Self {
        Self {
            verifier: Box::new(verifier),
            clock,
            policy,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub const fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    /// Verify credentials and open a new session
    ///
    /// Unknown users and wrong passwords fail identically with
    /// [`HelpdeskError::InvalidCredentials`].
    pub fn login(&self, username: &str, password: &str) -> Result<Session> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(HelpdeskError::invalid_field(
                "credentials",
                "username and password are required",
            ));
        }

        if !self.verifier.verify(username, password) {
            tracing::warn!("Rejected login attempt for '{}'", username);
            return Err(HelpdeskError::InvalidCredentials);
        }

        let session = Session::issue(username, self.clock.now());
        self.write_sessions()
            .insert(session.token.clone(), session.clone());
        tracing::info!("User '{}' logged in", session.username);
        Ok(session)
    }

    /// Look up a live session and refresh its idle timer
    ///
    /// Expired sessions are removed on the way out.
    pub fn authenticate(&self, token: &SessionToken) -> Result<Session> {
        let now = self.clock.now();
        let mut sessions = self.write_sessions();

        let Some(session) = sessions.get_mut(token) else {
            return Err(HelpdeskError::Unauthenticated);
        };

        if self.policy.is_expired(session, now) {
            tracing::debug!("Session for '{}' expired", session.username);
            sessions.remove(token);
            return Err(HelpdeskError::Unauthenticated);
        }

        session.last_used_at = now;
        Ok(session.clone())
    }

    /// Gate placed in front of every mutating ticket operation
    ///
    /// A missing token fails the same way an invalid one does.
    pub fn require_auth(&self, token: Option<&SessionToken>) -> Result<Session> {
        token.map_or(Err(HelpdeskError::Unauthenticated), |token| {
            self.authenticate(token)
        })
    }

    /// Destroy a session; unknown or expired tokens are ignored
    pub fn logout(&self, token: &SessionToken) {
        if let Some(session) = self.write_sessions().remove(token) {
            tracing::info!("User '{}' logged out", session.username);
        }
    }

    /// Drop every expired session, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.write_sessions();
        let before = sessions.len();
        sessions.retain(|_, session| !self.policy.is_expired(session, now));
        let purged = before - sessions.len();
        if purged > 0 {
            tracing::debug!("Purged {} expired sessions", purged);
        }
        purged
    }

    /// Number of sessions that are still live right now
    pub fn active_sessions(&self) -> usize {
        let now = self.clock.now();
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|session| !self.policy.is_expired(session, now))
            .count()
    }

    fn write_sessions(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<SessionToken, Session>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}
