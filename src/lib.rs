//! # apex
//!
//! A landing-site server that runs behind a TLS-terminating edge proxy and
//! gives every page exactly one URL.
//!
//! ## The contract
//!
//! The edge owns TLS, rate limiting and slow clients. apex owns the rest:
//!
//! - **Canonical host and scheme** — `www.` hosts and plain http are sent to
//!   `https://<apex>` with a single `301`; see [`middleware::canonical`]
//! - **Page metadata** — canonical and Open Graph URLs, robots directives,
//!   sitemap and robots.txt
//! - **Graceful shutdown** — SIGTERM / Ctrl-C, drains in-flight requests
//!
//! ## Request pipeline
//!
//! ```text
//! request ─► trace span ─► path filter ─► canonicalize ─► router ─► page
//!                              │ skipped        │ 301
//!                              └──► router      └──► response
//! ```
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use apex::{App, Server, SiteConfig, pages};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), apex::Error> {
//!     let config = Arc::new(SiteConfig::new("cowboysafari.buzz")?);
//!     let app = App::new(Arc::clone(&config), pages::router(config));
//!     Server::bind(([0, 0, 0, 0], 3000).into()).serve(app).await
//! }
//! ```

mod app;
mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod config;
pub mod context;
pub mod health;
pub mod middleware;
pub mod pages;
pub mod seo;
pub mod sitemap;

pub use app::App;
pub use config::{Mode, SiteConfig};
pub use context::{RequestContext, Scheme};
pub use error::Error;
pub use handler::Handler;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
