//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler, and the handler gets the router's state.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{Handler, SharedHandler};
use crate::method::Method;

/// Why a lookup produced no handler.
#[derive(Debug, PartialEq)]
pub(crate) enum Miss {
    /// No tree knows the path.
    NotFound,
    /// The path exists, but only under the listed methods.
    MethodNotAllowed(Vec<Method>),
}

/// The application router over shared state `S`.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] call returns `self` so registrations chain naturally.
pub struct Router<S = ()> {
    state: Arc<S>,
    routes: HashMap<Method, MatchitRouter<SharedHandler<S>>>,
}

impl Router {
    /// A router whose handlers need no state.
    pub fn new() -> Self {
        Self::with_state(Arc::new(()))
    }
}

impl<S: Send + Sync + 'static> Router<S> {
    /// A router that passes `state` to every handler.
    pub fn with_state(state: Arc<S>) -> Self {
        Self { state, routes: HashMap::new() }
    }

    pub fn state(&self) -> &Arc<S> {
        &self.state
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and are read with `req.param("name")`:
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use recipe_box::{Method, Request, Response, Router};
    /// # async fn list(_: Arc<()>, _: Request) -> Response { Response::text("") }
    /// # async fn delete(_: Arc<()>, _: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::Get,    "/recipes",      list)
    ///     .on(Method::Delete, "/recipes/{id}", delete);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is malformed or conflicts with a route already
    /// registered for `method`. Routes are fixed at startup, so this is a
    /// programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_shared())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Result<(SharedHandler<S>, HashMap<String, String>), Miss> {
        if let Some(matched) = self.routes.get(&method).and_then(|tree| tree.at(path).ok()) {
            let handler = Arc::clone(matched.value);
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            return Ok((handler, params));
        }

        Err(self.miss(path))
    }

    /// Classifies a failed lookup by checking the other method trees.
    pub(crate) fn miss(&self, path: &str) -> Miss {
        let mut allowed: Vec<Method> = self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(method, _)| *method)
            .collect();

        if allowed.is_empty() {
            return Miss::NotFound;
        }
        allowed.sort_by_key(|m| m.as_str());
        Miss::MethodNotAllowed(allowed)
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
