//! Host and scheme canonicalization.
//!
//! Every page has exactly one canonical URL: `https://<apex><path>`. This
//! middleware sends clients there with a single `301` when they arrive on a
//! `www.` host or over plain http, and otherwise tags the request with
//! `x-pathname` and `x-forwarded-proto` for the page handlers.
//!
//! | Request                         | Outcome                              |
//! |---------------------------------|--------------------------------------|
//! | `http://www.apex/p` (prod)      | `301 https://apex/p`                 |
//! | `https://www.apex/p`            | `301 https://apex/p`                 |
//! | `http://www.apex/p` (dev)       | `301 http://apex/p`                  |
//! | `http://apex/p?q` (prod)        | `301 https://apex/p?q`               |
//! | `http://apex:80/p` (prod)       | `301 https://apex/p`                 |
//! | `https://apex/p`                | continue, `x-forwarded-proto: https` |
//! | `http://localhost:3000/p`       | continue, `x-forwarded-proto: http`  |
//!
//! The `www.` rule runs first so `http://www.` costs one hop, not two.
//! Anything the rules cannot make sense of (no host, a bare `www.`, a
//! location that is not a valid header value) passes through untouched.

use std::sync::Arc;

use http::HeaderValue;
use http::request::Parts;
use tracing::{debug, warn};

use crate::config::SiteConfig;
use crate::context::{RequestContext, Scheme, X_FORWARDED_PROTO, X_PATHNAME};
use crate::middleware::Processing;
use crate::response::Response;

const WWW_PREFIX: &str = "www.";
const LOOPBACK_HOST: &str = "localhost";

/// What canonicalization decided for one request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Decision {
    /// Permanent redirect to this absolute URL.
    Redirect { location: String },
    /// Continue to the router with these enrichment values.
    Forward { pathname: String, proto: Scheme },
}

/// The canonicalization middleware. Cheap to clone; holds only the shared
/// configuration.
#[derive(Clone, Debug)]
pub struct Canonicalizer {
    config: Arc<SiteConfig>,
}

impl Canonicalizer {
    pub fn new(config: Arc<SiteConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// `true` for the apex itself and any subdomain of it.
    pub fn is_production_domain(&self, hostname: &str) -> bool {
        let apex = self.config.canonical_host();
        hostname == apex
            || hostname
                .strip_suffix(apex)
                .is_some_and(|sub| sub.len() > 1 && sub.ends_with('.'))
    }

    fn is_development(&self, hostname: &str) -> bool {
        self.config.is_development() || hostname == LOOPBACK_HOST
    }

    /// Enrichment values for a request that is not redirected. The apex and
    /// its subdomains always report `https`.
    fn enrichment(&self, ctx: &RequestContext) -> (String, Scheme) {
        let proto = if self.is_production_domain(&ctx.hostname) {
            Scheme::Https
        } else {
            ctx.scheme
        };
        (ctx.path.clone(), proto)
    }

    fn forward(&self, ctx: &RequestContext) -> Decision {
        let (pathname, proto) = self.enrichment(ctx);
        Decision::Forward { pathname, proto }
    }

    /// Pure decision for one request context.
    pub fn evaluate(&self, ctx: &RequestContext) -> Decision {
        let host = ctx.hostname.as_str();
        if host.is_empty() {
            return self.forward(ctx);
        }

        let development = self.is_development(host);

        if let Some(bare) = host.strip_prefix(WWW_PREFIX) {
            if bare.is_empty() {
                return self.forward(ctx);
            }
            let scheme = if development { ctx.scheme } else { Scheme::Https };
            return Decision::Redirect { location: ctx.url_with(scheme, bare) };
        }

        if !development && ctx.scheme == Scheme::Http {
            return Decision::Redirect { location: ctx.url_with(Scheme::Https, host) };
        }

        self.forward(ctx)
    }

    /// Runs canonicalization against a request head.
    ///
    /// On redirect returns the `301`. Otherwise writes `x-pathname` and
    /// `x-forwarded-proto` into `head`, replacing any values the client sent.
    pub fn process(&self, head: &mut Parts, connection: Scheme) -> Processing {
        let ctx = RequestContext::from_head(head, connection, self.config.trusts_forwarded_proto());

        let (pathname, proto) = match self.evaluate(&ctx) {
            Decision::Redirect { location } => match HeaderValue::from_str(&location) {
                Ok(value) => {
                    debug!(from = %ctx.url_with(ctx.scheme, &ctx.hostname), to = %location, "canonical redirect");
                    return Processing::EarlyReturn(Response::permanent_redirect(value));
                }
                Err(_) => {
                    warn!(host = %ctx.hostname, "redirect target is not a valid header value, passing through");
                    self.enrichment(&ctx)
                }
            },
            Decision::Forward { pathname, proto } => (pathname, proto),
        };

        let pathname = HeaderValue::from_str(&pathname).unwrap_or_else(|_| HeaderValue::from_static("/"));
        head.headers.insert(X_PATHNAME, pathname);
        head.headers.insert(X_FORWARDED_PROTO, HeaderValue::from_static(proto.as_str()));
        Processing::Continue
    }
}
