//! Serve the current working directory on port 8080.
//!
//! Run with:
//!   RUST_LOG=info cargo run
//!
//! Try:
//!   curl http://localhost:8080/a.html
//!   curl http://localhost:8080/docs/
//!   curl http://localhost:8080/hello.py

use porch::{CaseChain, ServeConfig, Server};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let chain = CaseChain::new(ServeConfig::current_dir());

    Server::bind("0.0.0.0:8080")
        .serve(chain)
        .await
        .expect("server error");
}
