//! Explicit request/response cookie state.
//!
//! A [`CookieContext`] carries the cookies of exactly one request: the values
//! read from the inbound `Cookie` header plus the `Set-Cookie` directives
//! staged while handling it. Handing the context around explicitly keeps the
//! session operations free of hidden global state.

use cookie::{Cookie, CookieJar};

/// Per-request cookie state.
///
/// Staged writes are immediately visible to [`get`](CookieContext::get), so
/// code running later in the same request observes its own changes. Once
/// [`commit`](CookieContext::commit) has drained the directives, the context
/// is sealed and further writes are rejected (the "headers already sent"
/// condition of the underlying transport).
pub struct CookieContext {
    jar: CookieJar,
    committed: bool,
}

impl CookieContext {
    /// Creates a context with no inbound cookies.
    pub fn new() -> Self {
        Self {
            jar: CookieJar::new(),
            committed: false,
        }
    }

    /// Creates a context from a raw `Cookie` header value.
    ///
    /// Values are percent-decoded; malformed pairs are skipped.
    pub fn from_header(header: &str) -> Self {
        let mut jar = CookieJar::new();
        for cookie in Cookie::split_parse_encoded(header).flatten() {
            jar.add_original(cookie.into_owned());
        }
        Self {
            jar,
            committed: false,
        }
    }

    /// Creates a context from already-decoded name/value pairs, as handed
    /// over by a web framework.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut jar = CookieJar::new();
        for (name, value) in pairs {
            jar.add_original(Cookie::new(name, value));
        }
        Self {
            jar,
            committed: false,
        }
    }

    /// Returns the request-visible value of a cookie.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.jar.get(name).map(Cookie::value)
    }

    /// Stages a `Set-Cookie` directive.
    ///
    /// Returns `false` without staging anything if the context has already
    /// been committed.
    pub fn set(&mut self, cookie: Cookie<'static>) -> bool {
        if self.committed {
            return false;
        }
        self.jar.add(cookie);
        true
    }

    /// Stages removal of a cookie (path `/`): an empty sentinel value with an
    /// already-past expiration. The cookie also disappears from
    /// [`get`](CookieContext::get) for the rest of the request.
    ///
    /// Returns `false` without staging anything if the context has already
    /// been committed.
    pub fn unset(&mut self, name: &str) -> bool {
        if self.committed {
            return false;
        }
        let mut removal = Cookie::new(name.to_owned(), "");
        removal.set_path("/");
        self.jar.remove(removal);
        true
    }

    /// Staged outbound directives, removals included.
    pub fn delta(&self) -> impl Iterator<Item = &Cookie<'static>> {
        self.jar.delta()
    }

    /// Drains the staged directives as percent-encoded `Set-Cookie` header
    /// values and seals the context. A second commit yields nothing.
    pub fn commit(&mut self) -> Vec<String> {
        if self.committed {
            return Vec::new();
        }
        self.committed = true;
        self.jar.delta().map(|c| c.encoded().to_string()).collect()
    }

    /// Returns true once the context has been committed.
    pub fn is_committed(&self) -> bool {
        self.committed
    }
}

impl Default for CookieContext {
    fn default() -> Self {
        Self::new()
    }
}
