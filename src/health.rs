//! Health-check handlers for the orchestrator.
//!
//! | Check | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can it serve pages? Failure → out of rotation. |
//!
//! Both paths are in the default exclusions of
//! [`PathFilter`](crate::middleware::matcher::PathFilter), so a kubelet
//! calling `http://<pod ip>/healthz` gets the handler's answer, never a
//! redirect to the canonical host.

use crate::{Request, Response};

/// Always `200 OK` with body `"ok"`.
pub async fn liveness(_req: Request) -> &'static str {
    "ok"
}

/// `200 OK` with body `"ready"`. The site has no dependencies to wait on.
pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}
