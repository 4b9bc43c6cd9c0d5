//! Request-path resolution and the filesystem probe.
//!
//! Resolution is the dumb half of the pipeline: it maps a request path to a
//! filesystem location and records what is actually there. It never fails;
//! a path that names nothing is a fact the probe records, not an error, and
//! the case chain decides what to do about it.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use http::Method;

use crate::config::ServeConfig;

/// Maps a request path onto the server root.
///
/// Plain concatenation, no normalization: the filesystem sees exactly
/// `<root><request path>`. In particular `..` segments are not stripped, so
/// a crafted path can escape the root. That behavior is preserved and
/// documented rather than hardened; run the server in a directory you are
/// willing to expose in full.
pub fn resolve(root: &str, request_path: &str) -> PathBuf {
    PathBuf::from(format!("{root}{request_path}"))
}

/// `index.html` within a directory, preferred over a listing when present.
pub(crate) fn index_path(dir: &Path) -> PathBuf {
    dir.join("index.html")
}

/// One-shot snapshot of the filesystem facts the case matchers consult.
///
/// Taken once per request so every matcher in the chain sees the same
/// state, and the matchers themselves stay pure functions.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathProbe {
    pub exists: bool,
    pub is_file: bool,
    pub is_dir: bool,
    /// Regular file whose name ends with the configured script extension.
    pub is_script: bool,
    /// Directory containing an `index.html` regular file.
    pub has_index: bool,
}

impl PathProbe {
    pub async fn scan(full_path: &Path, config: &ServeConfig) -> Self {
        let meta = tokio::fs::metadata(full_path).await.ok();
        let is_file = meta.as_ref().is_some_and(|m| m.is_file());
        let is_dir = meta.as_ref().is_some_and(|m| m.is_dir());

        let is_script = is_file
            && full_path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(&config.script_ext));

        let has_index = is_dir
            && tokio::fs::metadata(index_path(full_path))
                .await
                .is_ok_and(|m| m.is_file());

        Self { exists: meta.is_some(), is_file, is_dir, is_script, has_index }
    }
}

/// Everything one dispatch knows about its request.
///
/// Built per inbound request, owned by that dispatch, dropped once the
/// response is rendered.
pub struct RequestContext {
    pub method: Method,
    /// Raw request path exactly as the client sent it.
    pub path: String,
    /// [`path`](RequestContext::path) mapped onto the server root.
    pub full_path: PathBuf,
    pub remote_addr: SocketAddr,
    pub probe: PathProbe,
}

impl RequestContext {
    pub async fn new(
        config: &ServeConfig,
        method: Method,
        path: String,
        remote_addr: SocketAddr,
    ) -> Self {
        let full_path = resolve(&config.root, &path);
        let probe = PathProbe::scan(&full_path, config).await;
        Self { method, path, full_path, remote_addr, probe }
    }
}
