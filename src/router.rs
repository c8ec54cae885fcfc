//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. `HEAD` requests without
//! their own route are answered by the `GET` handler with the body dropped.
//! Anything unmatched goes to the fallback handler (a bare 404 unless one is
//! set).

use std::collections::HashMap;
use std::sync::Arc;

use http::request::Parts;
use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Build it once at startup and hand it to [`App`](crate::App). Each
/// registration returns `self` so calls chain.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    fallback: Option<BoxedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), fallback: None }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered. Routes are fixed at startup, so this is a programming
    /// error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    /// Handler for requests no route matches.
    pub fn fallback(mut self, handler: impl Handler) -> Self {
        self.fallback = Some(handler.into_boxed_handler());
        self
    }

    fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// Routes one request head to its handler and awaits the response.
    pub(crate) async fn route(&self, head: Parts) -> Response {
        let path = head.uri.path().to_owned();
        let is_head = head.method == Method::HEAD;

        let found = self.lookup(&head.method, &path).or_else(|| {
            if is_head { self.lookup(&Method::GET, &path) } else { None }
        });

        let response = match found {
            Some((handler, params)) => handler.call(Request::new(head, params)).await,
            None => match &self.fallback {
                Some(handler) => handler.call(Request::new(head, HashMap::new())).await,
                None => Response::status(StatusCode::NOT_FOUND),
            },
        };

        if is_head { response.without_body() } else { response }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
