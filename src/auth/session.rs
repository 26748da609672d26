use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque bearer token referencing a session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(Uuid);

impl SessionToken {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for SessionToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Snapshot of a logged-in principal
///
/// Only [`SessionGate`](super::SessionGate) creates these. A snapshot proves
/// nothing on its own: mutating calls present the token and the gate decides
/// whether it is still live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub(crate) token: SessionToken,
    pub(crate) username: String,
    pub(crate) authenticated_at: DateTime<Utc>,
    pub(crate) last_used_at: DateTime<Utc>,
}

impl Session {
    pub(crate) fn issue(username: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            token: SessionToken::generate(),
            username: username.into(),
            authenticated_at: now,
            last_used_at: now,
        }
    }

    pub const fn token(&self) -> &SessionToken {
        &self.token
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub const fn authenticated_at(&self) -> DateTime<Utc> {
        self.authenticated_at
    }

    pub const fn last_used_at(&self) -> DateTime<Utc> {
        self.last_used_at
    }
}

/// Idle and absolute session lifetimes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Maximum gap between two uses
    pub idle_timeout: Duration,
    /// Maximum age since login, regardless of activity
    pub absolute_timeout: Duration,
}

impl SessionPolicy {
    pub const fn new(idle_timeout: Duration, absolute_timeout: Duration) -> Self {
        Self {
            idle_timeout,
            absolute_timeout,
        }
    }

    /// A session is dead once either limit is reached
    pub fn is_expired(&self, session: &Session, now: DateTime<Utc>) -> bool {
        now - session.last_used_at >= self.idle_timeout
            || now - session.authenticated_at >= self.absolute_timeout
    }
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self::new(Duration::hours(2), Duration::hours(24))
    }
}
