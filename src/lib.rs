//! # recipe-box
//!
//! A small HTTP service holding a collection of recipes in memory.
//!
//! The crate carries its own thin HTTP layer: radix-tree routing via
//! [`matchit`], hyper 1.x for the wire, tokio for I/O, and graceful shutdown
//! that drains in-flight requests. On top of it sits [`recipes`], the
//! collection and its four endpoints.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use recipe_box::{Server, app, recipes::RecipeStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), recipe_box::Error> {
//!     let store = Arc::new(RecipeStore::with_samples());
//!     Server::bind(([127, 0, 0, 1], 8080).into()).serve(app(store)).await
//! }
//! ```

use std::sync::Arc;

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod config;
pub mod health;
pub mod recipes;

pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::{DEFAULT_BODY_LIMIT, Server};
pub use status::Status;

use recipes::RecipeStore;

/// The full route table over `store`: recipe endpoints plus health probes.
pub fn app(store: Arc<RecipeStore>) -> Router<RecipeStore> {
    health::routes(recipes::http::routes(Router::with_state(store)))
}
