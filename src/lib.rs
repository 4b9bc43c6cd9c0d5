//! # porch
//!
//! A small HTTP file server with one idea: a request path is *classified*,
//! not routed. An ordered chain of cases inspects what the path names on
//! disk, and the first case that recognizes the shape produces the
//! response.
//!
//! ## The chain
//!
//! | # | Case | Claims | Produces |
//! |---|------|--------|----------|
//! | 1 | `NoFile` | nothing on disk | 404 error page |
//! | 2 | `ScriptFile` | file with the script extension (`*.py` by default) | the script's stdout |
//! | 3 | `RegularFile` | any other file | the file's bytes |
//! | 4 | `DirectoryWithIndex` | directory with `index.html` | the index file |
//! | 5 | `DirectoryWithoutIndex` | any other directory | generated listing |
//! | 6 | `Fallback` | anything | 404 error page |
//!
//! Order is the contract: a script is also a regular file, and it runs
//! because it is tested first.
//!
//! ## What porch is not
//!
//! No TLS, no caching headers, no auth, no MIME table (everything ships as
//! `text/html`). Put a reverse proxy in front if you need those. And one
//! honest warning: request paths are concatenated onto the root without
//! sanitization, so `..` segments can escape it. Serve a directory you are
//! willing to expose in full, on a network you trust.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use porch::{CaseChain, ServeConfig, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let chain = CaseChain::new(ServeConfig::current_dir());
//!     Server::bind("0.0.0.0:8080").serve(chain).await.unwrap();
//! }
//! ```

mod case;
mod config;
mod error;
mod resolve;
mod response;
mod script;
mod server;

pub use case::{Case, CaseChain, Outcome};
pub use config::ServeConfig;
pub use error::Error;
pub use resolve::{PathProbe, RequestContext};
pub use response::Content;
pub use server::Server;
