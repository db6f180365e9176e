//! Cookie-backed sessions.
//!
//! A session here is nothing more than a small set of cookies sharing one
//! expiration instant: the user's id, the serialized user record, an optional
//! authentication token hash, and the remaining lifetime at creation time.
//! There is no server-side session table; the cookie set *is* the session.
//!
//! All operations work on an explicit [`CookieContext`] seeded from the
//! inbound request, never on ambient global state, so the lifecycle can be
//! exercised without an HTTP layer.
//!
//! # Example
//!
//! ```rust
//! use cookie_session::{CookieContext, CookieSession, SessionConfig, TokenRecord, UserRecord};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! impl UserRecord for User {
//!     fn id(&self) -> i64 {
//!         self.id
//!     }
//! }
//!
//! let user = User { id: 42, name: "ada".to_owned() };
//! let token = TokenRecord { hash: "abc123".to_owned(), expires_at: None };
//!
//! let mut ctx = CookieContext::new();
//! let ok = CookieSession::create(&mut ctx, &user, Some(&token), false, &SessionConfig::default())
//!     .expect("user record serializes");
//! assert!(ok);
//!
//! assert_eq!(CookieSession::id(&ctx), 42);
//! assert_eq!(CookieSession::token(&ctx), Some("abc123"));
//!
//! // Set-Cookie header values for the response:
//! let headers = ctx.commit();
//! assert!(!headers.is_empty());
//! ```

pub mod context;
pub mod session;

pub use context::CookieContext;
pub use session::CookieSession;
pub use session::Session;
pub use session::SessionConfig;
pub use session::TokenRecord;
pub use session::UserRecord;

use std::fmt;

/// Errors surfaced by session reads and writes.
///
/// Missing cookies are never an error; they mean "no active session".
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The user record could not be serialized during [`CookieSession::create`].
    EncodeUser(String),
    /// A `session_user` cookie is present but does not deserialize.
    DecodeUser(String),
    /// A `session_time` cookie is present but is not a decimal integer.
    MalformedTime(String),
}

impl std::error::Error for SessionError {}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EncodeUser(msg) => write!(f, "Failed to encode user record: {}", msg),
            SessionError::DecodeUser(msg) => write!(f, "Failed to decode user record: {}", msg),
            SessionError::MalformedTime(msg) => write!(f, "Malformed session time: {}", msg),
        }
    }
}
