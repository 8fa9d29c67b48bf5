//! HTTP server and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server:
//! 1. Stops calling `listener.accept()`, so no new connections are made.
//! 2. Lets every in-flight connection task run to completion.
//! 3. Returns from [`Server::serve`], which lets `main` exit cleanly.
//!
//! Tests drive the same loop through [`Server::serve_with_shutdown`] with a
//! future they control.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::error::Error;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::router::{Miss, Router};
use crate::status::Status;

/// Default cap on a request body: 1 MiB.
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// The HTTP server.
pub struct Server {
    listen: Listen,
    body_limit: usize,
}

enum Listen {
    Addr(SocketAddr),
    Bound(TcpListener),
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// ```rust,no_run
    /// use recipe_box::Server;
    /// let server = Server::bind(([0, 0, 0, 0], 8080).into());
    /// ```
    pub fn bind(addr: SocketAddr) -> Self {
        Self { listen: Listen::Addr(addr), body_limit: DEFAULT_BODY_LIMIT }
    }

    /// Serves on a listener the caller already bound, e.g. `127.0.0.1:0`.
    pub fn from_listener(listener: TcpListener) -> Self {
        Self { listen: Listen::Bound(listener), body_limit: DEFAULT_BODY_LIMIT }
    }

    /// Largest request body read into memory. Longer bodies get `413`.
    pub fn body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    /// Starts accepting connections and dispatching them through `router`.
    ///
    /// Returns only after a full graceful shutdown (SIGTERM or Ctrl-C,
    /// followed by all in-flight requests completing).
    pub async fn serve<S>(self, router: Router<S>) -> Result<(), Error>
    where
        S: Send + Sync + 'static,
    {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Like [`serve`](Server::serve), but stops accepting once `signal`
    /// resolves instead of waiting for a process signal.
    pub async fn serve_with_shutdown<S, F>(self, router: Router<S>, signal: F) -> Result<(), Error>
    where
        S: Send + Sync + 'static,
        F: Future<Output = ()> + Send,
    {
        let listener = match self.listen {
            Listen::Bound(listener) => listener,
            Listen::Addr(addr) => TcpListener::bind(addr)
                .await
                .map_err(|source| Error::Bind { addr, source })?,
        };
        let local_addr = listener.local_addr()?;
        let body_limit = self.body_limit;

        let router = Arc::new(router);

        info!(addr = %local_addr, body_limit, "recipe-box listening");

        let mut tasks = tokio::task::JoinSet::new();

        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Check shutdown first so a signal stops accepting even while
                // connections are still queued.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // Called once per request on the connection.
                        let svc = service_fn(move |req| {
                            let router = Arc::clone(&router);
                            async move { dispatch(router, req, remote_addr, body_limit).await }
                        });

                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet stays bounded.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("recipe-box stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one request and produces one response.
///
/// Every failure is answered with a status code, so hyper never sees an error.
async fn dispatch<S: Send + Sync + 'static>(
    router: Arc<Router<S>>,
    req: hyper::Request<hyper::body::Incoming>,
    remote_addr: SocketAddr,
    body_limit: usize,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    let path = parts.uri.path().to_owned();

    let response = match Method::try_from(&parts.method) {
        Err(()) => not_allowed(router.miss(&path)),
        Ok(method) => match router.lookup(method, &path) {
            Err(miss) => not_allowed(miss),
            Ok((handler, params)) => match Limited::new(body, body_limit).collect().await {
                Ok(collected) => {
                    let req = Request::new(path.clone(), collected.to_bytes(), params);
                    handler.invoke(Arc::clone(router.state()), req).await
                }
                Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
                    warn!(peer = %remote_addr, body_limit, "request body too large");
                    Response::status(Status::PayloadTooLarge)
                }
                Err(e) => {
                    warn!(peer = %remote_addr, "failed to read request body: {e}");
                    Response::status(Status::BadRequest)
                }
            },
        },
    };

    info!(
        method = %parts.method,
        path = %path,
        status = response.status.as_u16(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "request",
    );

    Ok(response.into_inner())
}

fn not_allowed(miss: Miss) -> Response {
    match miss {
        Miss::NotFound => Response::status(Status::NotFound),
        Miss::MethodNotAllowed(allowed) => {
            let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
            debug!(%allow, "method not allowed");
            Response::builder()
                .status(Status::MethodNotAllowed)
                .header("allow", &allow)
                .no_body()
        }
    }
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both SIGTERM and SIGINT (Ctrl-C). On Windows
/// only Ctrl-C is available.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
