//! The request pipeline: trace, filter, canonicalize, route.

use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;

use crate::config::SiteConfig;
use crate::context::Scheme;
use crate::middleware::canonical::Canonicalizer;
use crate::middleware::matcher::PathFilter;
use crate::middleware::{Processing, trace};
use crate::router::Router;

/// Everything needed to answer a request. Built once, shared by every
/// connection task behind an `Arc`.
pub struct App {
    router: Router,
    canonical: Canonicalizer,
    filter: PathFilter,
    connection_scheme: Scheme,
}

impl App {
    /// Pipeline with the default path filter. Connections are assumed to be
    /// plain http from the edge proxy.
    pub fn new(config: Arc<SiteConfig>, router: Router) -> Self {
        Self {
            router,
            canonical: Canonicalizer::new(config),
            filter: PathFilter::default(),
            connection_scheme: Scheme::Http,
        }
    }

    pub fn filter(mut self, filter: PathFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Scheme of the listening socket, used when no trusted
    /// `x-forwarded-proto` says otherwise.
    pub fn connection_scheme(mut self, scheme: Scheme) -> Self {
        self.connection_scheme = scheme;
        self
    }

    pub fn config(&self) -> &SiteConfig {
        self.canonical.config()
    }

    /// Answers one request. The body is never read.
    pub async fn handle<B>(&self, req: http::Request<B>) -> http::Response<Full<Bytes>> {
        let (mut head, _) = req.into_parts();
        let method = head.method.clone();
        let path = head.uri.path().to_owned();

        let response = trace::traced(&method, &path, async move {
            if self.filter.applies(head.uri.path()) {
                if let Processing::EarlyReturn(res) = self.canonical.process(&mut head, self.connection_scheme) {
                    return res;
                }
            }
            self.router.route(head).await
        })
        .await;

        response.into_inner()
    }
}
