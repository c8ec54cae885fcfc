//! Per-request canonicalization context.
//!
//! A [`RequestContext`] is built fresh from the request head, consumed by the
//! canonicalization middleware, and dropped. Nothing here touches I/O.

use std::fmt;
use std::str::FromStr;

use http::header::HOST;
use http::request::Parts;
use http::uri::Authority;

/// Header set by the edge proxy (and by the middleware, for page handlers).
pub const X_FORWARDED_PROTO: http::HeaderName = http::HeaderName::from_static("x-forwarded-proto");

/// Header carrying the request path to page handlers.
pub const X_PATHNAME: http::HeaderName = http::HeaderName::from_static("x-pathname");

/// URL scheme of a request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// Port a URL of this scheme implies when it names none.
    pub fn default_port(self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("https") {
            Ok(Self::Https)
        } else if s.eq_ignore_ascii_case("http") {
            Ok(Self::Http)
        } else {
            Err(())
        }
    }
}

/// The parts of one request that decide its canonical form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestContext {
    /// Lowercased host without port. Empty when the request carried no
    /// usable `Host`.
    pub hostname: String,
    pub port: Option<u16>,
    pub scheme: Scheme,
    pub path: String,
    pub query: Option<String>,
}

impl RequestContext {
    /// Reads the context from a request head.
    ///
    /// `connection` is the scheme of the socket the request arrived on. When
    /// `trust_forwarded` is set, a recognisable first value of
    /// `x-forwarded-proto` overrides it.
    pub fn from_head(head: &Parts, connection: Scheme, trust_forwarded: bool) -> Self {
        // HTTP/1.1 carries the host in `Host`; HTTP/2 in the `:authority`
        // pseudo-header, which hyper exposes through the URI.
        let authority = head
            .headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Authority::from_str(v.trim()).ok())
            .or_else(|| head.uri.authority().cloned());

        let (hostname, port) = match authority {
            Some(a) => (a.host().to_ascii_lowercase(), a.port_u16()),
            None => (String::new(), None),
        };

        let forwarded = trust_forwarded
            .then(|| head.headers.get(&X_FORWARDED_PROTO))
            .flatten()
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse::<Scheme>().ok());

        let scheme = forwarded.unwrap_or(connection);

        Self {
            hostname,
            port: port.filter(|&p| p != scheme.default_port()),
            scheme,
            path: head.uri.path().to_owned(),
            query: head.uri.query().map(str::to_owned),
        }
    }

    /// Absolute URL of this request with `scheme` and `host` swapped in.
    /// Path and query are carried over unchanged. An explicit port is kept
    /// unless it is the default of either the old or the new scheme.
    pub fn url_with(&self, scheme: Scheme, host: &str) -> String {
        let mut url = format!("{scheme}://{host}");
        let port = self
            .port
            .filter(|&p| p != self.scheme.default_port() && p != scheme.default_port());
        if let Some(port) = port {
            url.push(':');
            url.push_str(&port.to_string());
        }
        url.push_str(&self.path);
        if let Some(query) = &self.query {
            url.push('?');
            url.push_str(query);
        }
        url
    }
}
