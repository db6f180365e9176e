mod config;
mod cookie;

pub use config::SessionConfig;
pub use cookie::CookieSession;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Name of the cookie holding the user id.
pub const SESSION_ID: &str = "session_id";
/// Name of the cookie holding the serialized user record.
pub const SESSION_USER: &str = "session_user";
/// Name of the cookie holding the token hash.
pub const SESSION_TOKEN: &str = "session_token";
/// Name of the cookie holding the remaining lifetime snapshot, in seconds.
pub const SESSION_TIME: &str = "session_time";

/// Session interface.
///
/// Carries the lifetime constants shared by session kinds; concrete
/// implementations inherit them unless overridden through [`SessionConfig`].
pub trait Session {
    /// Maximum session length in seconds (365 days), used for
    /// stay-logged sessions.
    const SESSION_MAX_LENGTH: i64 = 30_758_400;

    /// Default session length in seconds (1 hour), used when neither a
    /// token expiration nor the stay-logged flag applies.
    const SESSION_DEF_LENGTH: i64 = 3_600;
}

/// A user record storable in a session.
///
/// The shape is caller-defined beyond the id; the whole record is serialized
/// into the `session_user` cookie verbatim and deserialized back on read.
///
/// # Example
///
/// ```rust
/// use cookie_session::UserRecord;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct User {
///     id: i64,
///     email: String,
/// }
///
/// impl UserRecord for User {
///     fn id(&self) -> i64 {
///         self.id
///     }
/// }
/// ```
pub trait UserRecord: Serialize + DeserializeOwned {
    /// The user's id, stored as the `session_id` cookie.
    fn id(&self) -> i64;
}

/// An authentication token attached to a session at creation time.
///
/// Only the hash is cached in the cookie set, never the credential itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// The token hash, stored verbatim as the `session_token` cookie.
    pub hash: String,
    /// When the token expires. `None` means no explicit expiration, in which
    /// case the session falls back to the default lifetime.
    pub expires_at: Option<DateTime<Utc>>,
}
