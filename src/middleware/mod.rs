//! Middleware layer.
//!
//! Middleware runs on the request head before routing:
//!
//! - [`trace`] — per-request span with method, path, status and latency
//! - [`matcher`] — decides which paths the canonicalization step sees
//! - [`canonical`] — host/scheme canonicalization and page enrichment
//!
//! A pre-routing step either lets the request continue (possibly after
//! editing its head) or answers it directly.

pub mod canonical;
pub mod matcher;
pub mod trace;

use crate::response::Response;

/// Result of a pre-routing middleware step.
#[derive(Debug)]
pub enum Processing {
    /// Hand the (possibly edited) request on to the router.
    Continue,
    /// Answer the request with this response; the router never sees it.
    EarlyReturn(Response),
}
