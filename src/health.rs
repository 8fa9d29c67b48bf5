//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? |
//! | **Readiness** | `/readyz` | Can it serve recipe traffic? |
//!
//! The recipe store lives in memory and is ready as soon as it is built, so
//! both probes answer `200` unconditionally. They work over any router state.

use std::sync::Arc;

use crate::{Method, Request, Response, Router};

/// Liveness probe. Always `200 OK` with body `"ok"`.
pub async fn liveness<S>(_state: Arc<S>, _req: Request) -> Response {
    Response::text("ok")
}

/// Readiness probe. Always `200 OK` with body `"ready"`.
pub async fn readiness<S>(_state: Arc<S>, _req: Request) -> Response {
    Response::text("ready")
}

/// Registers both probes on `router`.
pub fn routes<S: Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router
        .on(Method::Get, "/healthz", liveness::<S>)
        .on(Method::Get, "/readyz", readiness::<S>)
}
