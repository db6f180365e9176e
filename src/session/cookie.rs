//! Cookie-backed session lifecycle.
//!
//! Four cookies make up a session, all on path `/` and all sharing one
//! expiration instant: `session_id`, `session_user`, `session_token`
//! (only when a token was supplied) and `session_time`. The last one is the
//! remaining lifetime at creation, in seconds, and drives
//! [`refresh`](CookieSession::refresh).

use chrono::{DateTime, Duration, Utc};
use cookie::{Cookie, Expiration};
use time::OffsetDateTime;

use crate::context::CookieContext;
use crate::SessionError;

use super::{Session, SessionConfig, TokenRecord, UserRecord};
use super::{SESSION_ID, SESSION_TIME, SESSION_TOKEN, SESSION_USER};

/// A cookie-token based session.
///
/// Stateless: every operation reads from and writes to the
/// [`CookieContext`] it is handed.
pub struct CookieSession;

impl Session for CookieSession {}

impl CookieSession {
    /// Returns the stored user record, or `None` if no session is active.
    ///
    /// A present but undecodable `session_user` cookie is an error, never
    /// silently treated as absent.
    pub fn user<U: UserRecord>(ctx: &CookieContext) -> Result<Option<U>, SessionError> {
        match ctx.get(SESSION_USER) {
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|e| SessionError::DecodeUser(e.to_string())),
            None => Ok(None),
        }
    }

    /// Returns the session's user id, or 0 if no active session is found.
    pub fn id(ctx: &CookieContext) -> i64 {
        ctx.get(SESSION_ID)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0)
    }

    /// Returns the session's token hash, or `None` if no token was attached.
    pub fn token(ctx: &CookieContext) -> Option<&str> {
        ctx.get(SESSION_TOKEN)
    }

    /// Creates a new session for `user`.
    ///
    /// The expiration instant is, in order of precedence: now plus the
    /// configured maximum length if `stay_logged`; the token's `expires_at`
    /// if one is set; now plus the configured default length otherwise.
    ///
    /// Returns `Ok(true)` only if every cookie write succeeded. A rejected
    /// write (context already committed) yields `Ok(false)`, not an error;
    /// the caller must check the flag.
    ///
    /// # Errors
    ///
    /// [`SessionError::EncodeUser`] if the user record does not serialize.
    pub fn create<U: UserRecord>(
        ctx: &mut CookieContext,
        user: &U,
        token: Option<&TokenRecord>,
        stay_logged: bool,
        config: &SessionConfig,
    ) -> Result<bool, SessionError> {
        let now = Utc::now();
        let expiration = if stay_logged {
            now + config.session_max_length
        } else if let Some(expires_at) = token.and_then(|t| t.expires_at) {
            expires_at
        } else {
            now + config.session_def_length
        };

        let user_json =
            serde_json::to_string(user).map_err(|e| SessionError::EncodeUser(e.to_string()))?;

        // Session id is the user id
        let mut status = set_session_cookie(ctx, SESSION_ID, user.id().to_string(), expiration);
        status &= set_session_cookie(ctx, SESSION_USER, user_json, expiration);
        if let Some(token) = token {
            status &= set_session_cookie(ctx, SESSION_TOKEN, token.hash.clone(), expiration);
        }
        // Lifetime snapshot, reused by refresh
        let lifetime = (expiration - now).num_seconds();
        status &= set_session_cookie(ctx, SESSION_TIME, lifetime.to_string(), expiration);

        if status {
            log::info!(
                target: "cookie_session",
                "msg=\"session created\" user_id={} expires_at=\"{}\"",
                user.id(),
                expiration.to_rfc3339()
            );
        }

        Ok(status)
    }

    /// Extends the session in place.
    ///
    /// The new expiration is now plus the lifetime stored in `session_time`;
    /// an absent `session_time` counts as 0. Every present session cookie is
    /// rewritten with the new expiration; `session_token` only if a token is
    /// currently attached.
    ///
    /// # Errors
    ///
    /// [`SessionError::MalformedTime`] if `session_time` is present but not
    /// a decimal integer.
    pub fn refresh(ctx: &mut CookieContext) -> Result<(), SessionError> {
        let lifetime = match ctx.get(SESSION_TIME) {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|e| SessionError::MalformedTime(e.to_string()))?,
            None => {
                log::warn!(
                    target: "cookie_session",
                    "msg=\"refresh without session_time\""
                );
                0
            }
        };
        let expiration = Utc::now() + Duration::seconds(lifetime);

        for name in [SESSION_ID, SESSION_USER, SESSION_TOKEN, SESSION_TIME] {
            let value = ctx.get(name).map(ToOwned::to_owned);
            if let Some(value) = value {
                set_session_cookie(ctx, name, value, expiration);
            }
        }

        log::debug!(
            target: "cookie_session",
            "msg=\"session refreshed\" expires_at=\"{}\"",
            expiration.to_rfc3339()
        );

        Ok(())
    }

    /// Destroys the session.
    ///
    /// All four cookies are overwritten with removal directives carrying an
    /// already-past expiration, and disappear from the current request's
    /// view as well.
    pub fn destroy(ctx: &mut CookieContext) {
        ctx.unset(SESSION_ID);
        ctx.unset(SESSION_USER);
        ctx.unset(SESSION_TOKEN);
        ctx.unset(SESSION_TIME);

        log::info!(target: "cookie_session", "msg=\"session destroyed\"");
    }
}

fn set_session_cookie(
    ctx: &mut CookieContext,
    name: &'static str,
    value: String,
    expires_at: DateTime<Utc>,
) -> bool {
    let mut cookie = Cookie::new(name, value);
    cookie.set_path("/");
    cookie.set_expires(to_cookie_expiration(expires_at));

    let ok = ctx.set(cookie);
    if !ok {
        log::warn!(
            target: "cookie_session",
            "msg=\"cookie write rejected\" cookie=\"{}\"",
            name
        );
    }
    ok
}

fn to_cookie_expiration(at: DateTime<Utc>) -> Expiration {
    OffsetDateTime::from_unix_timestamp(at.timestamp())
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
        .into()
}
