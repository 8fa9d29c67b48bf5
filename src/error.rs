//! Infrastructure error type.

use std::net::SocketAddr;

use thiserror::Error;

/// The error type returned by the server's fallible operations.
///
/// Request-level failures (a missing recipe, a malformed body) never become
/// an `Error`; they are answered as HTTP [`Response`](crate::Response)s. This
/// type covers the socket: binding the listener or reading its address.
#[derive(Debug, Error)]
pub enum Error {
    /// The listener could not be bound to the configured address.
    #[error("failed to bind {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Any other socket-level failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
