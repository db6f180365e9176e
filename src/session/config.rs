use chrono::Duration;

use super::{CookieSession, Session};

/// Session lifetime configuration.
///
/// The defaults come from the [`Session`] constants; a caller wired to a
/// framework configuration builds the struct from its own settings instead.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Lifetime of stay-logged sessions.
    pub session_max_length: Duration,
    /// Lifetime of sessions created without a token expiration.
    pub session_def_length: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_max_length: Duration::seconds(CookieSession::SESSION_MAX_LENGTH),
            session_def_length: Duration::seconds(CookieSession::SESSION_DEF_LENGTH),
        }
    }
}
