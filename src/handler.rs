//! Stateful handlers and their type erasure.
//!
//! Every handler receives the router's shared state next to the request:
//!
//! ```text
//! async fn list(store: Arc<RecipeStore>, req: Request) -> impl IntoResponse
//! ```
//!
//! A [`Router<S>`](crate::Router) stores handlers of many concrete types in
//! one table, so each is wrapped in [`HandlerFn`] and kept as a
//! [`SharedHandler<S>`]. A request costs one `Arc` clone of the handler, one
//! of the state, and one virtual call.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// What an erased handler hands back to the server.
pub(crate) type ResponseFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Object-safe form of [`Handler`].
#[doc(hidden)]
pub trait DynHandler<S>: Send + Sync + 'static {
    fn invoke(&self, state: Arc<S>, req: Request) -> ResponseFuture;
}

/// A handler as the router keeps it.
#[doc(hidden)]
pub type SharedHandler<S> = Arc<dyn DynHandler<S>>;

/// Anything the router accepts for a route over state `S`.
///
/// Implemented for every `Fn(Arc<S>, Request) -> impl Future<Output = impl IntoResponse>`,
/// so plain `async fn`s register directly.
pub trait Handler<S>: Send + Sync + 'static {
    #[doc(hidden)]
    fn into_shared(self) -> SharedHandler<S>;
}

impl<S, F, Fut, R> Handler<S> for F
where
    S: Send + Sync + 'static,
    F: Fn(Arc<S>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    fn into_shared(self) -> SharedHandler<S> {
        Arc::new(HandlerFn(self))
    }
}

/// Binds a concrete function to [`DynHandler`].
struct HandlerFn<F>(F);

impl<S, F, Fut, R> DynHandler<S> for HandlerFn<F>
where
    S: Send + Sync + 'static,
    F: Fn(Arc<S>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    fn invoke(&self, state: Arc<S>, req: Request) -> ResponseFuture {
        let pending = (self.0)(state, req);
        Box::pin(async move { pending.await.into_response() })
    }
}
