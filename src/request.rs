//! Incoming HTTP request type, as seen by page handlers.

use std::collections::HashMap;

use http::request::Parts;

use crate::context::{Scheme, X_FORWARDED_PROTO, X_PATHNAME};

/// An incoming request head plus the route parameters that matched it.
///
/// The site serves no request bodies, so the body is dropped before routing.
pub struct Request {
    pub(crate) head: Parts,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(head: Parts, params: HashMap<String, String>) -> Self {
        Self { head, params }
    }

    pub fn path(&self) -> &str { self.head.uri.path() }

    /// Header lookup; `None` when absent or not visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/games/{slug}`, `req.param("slug")` on `/games/safari`
    /// returns `Some("safari")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The path recorded by the canonicalization middleware, falling back to
    /// the request path on routes the middleware skips.
    pub fn pathname(&self) -> &str {
        self.head
            .headers
            .get(&X_PATHNAME)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_else(|| self.path())
    }

    /// The scheme recorded by the canonicalization middleware.
    ///
    /// Informational only: canonical URLs are always built with `https`.
    pub fn forwarded_proto(&self) -> Option<Scheme> {
        self.head
            .headers
            .get(&X_FORWARDED_PROTO)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    }
}
