//! Unified error type.
//!
//! Two kinds of failure live here and they never mix on the wire.
//! Dispatch failures (`NotFound`, `Read`, `List`, `Unknown`) are ordinary
//! outcomes of classifying a request path: they render as the uniform 404
//! error page and only the requesting client hears about them. `Io` is
//! infrastructure (binding the listener, accepting a connection) and
//! surfaces from [`Server::serve`](crate::Server::serve) to `main`.
//!
//! The `Display` strings of the dispatch variants are wire-visible: they
//! are embedded verbatim in the error page body.

use std::io;

/// Everything that can go wrong while resolving a request or running the
/// server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The resolved path names nothing on disk.
    #[error("{0} not found")]
    NotFound(String),

    /// A file exists but could not be opened or read. Also covers a script
    /// whose interpreter failed to spawn.
    #[error("{path} cannot be read: {source}")]
    Read { path: String, source: io::Error },

    /// A directory exists but could not be enumerated.
    #[error("{path} cannot be listed: {source}")]
    List { path: String, source: io::Error },

    /// The path names something that is neither file nor directory.
    /// Unreachable while the earlier cases cover every filesystem shape;
    /// kept as the terminal state so dispatch stays total.
    #[error("Unknown object '{0}'")]
    Unknown(String),

    /// Infrastructure failure: bind or accept.
    #[error("io: {0}")]
    Io(#[from] io::Error),
}
