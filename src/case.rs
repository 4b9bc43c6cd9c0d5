//! The resolution engine: an ordered chain of cases.
//!
//! A request path is not routed, it is *classified*. Each [`Case`] is a
//! matcher/action pair: `matches` decides whether the case claims the
//! request, `execute` produces its outcome. The chain walks its fixed list
//! in priority order and the first claim wins; there is no backtracking and
//! no second opinion.
//!
//! Two properties make the chain easy to reason about:
//!
//! - **Purity of matching.** Matchers read the [`PathProbe`] snapshot taken
//!   when the context was built, never the live filesystem, so all six see
//!   the same state no matter how slowly the chain walks.
//! - **Totality.** [`Case::Fallback`] matches unconditionally, so every
//!   context selects exactly one case and dispatch always produces an
//!   [`Outcome`].
//!
//! Order is the contract. A `.py` file satisfies the regular-file predicate
//! too; it runs as a script because `ScriptFile` is tested first.

use std::net::SocketAddr;
use std::path::Path;

use bytes::Bytes;
use http::Method;
use http_body_util::Full;
use tracing::info;

use crate::config::ServeConfig;
use crate::error::Error;
use crate::resolve::{RequestContext, index_path};
use crate::response::{self, Content};
use crate::script;

/// The tagged result of a case's action: content to send, or a failure to
/// report.
pub type Outcome = Result<Content, Error>;

/// A matcher/action pair used to classify and respond to a request.
///
/// A closed set: the six variants cover every filesystem shape a resolved
/// path can have ({missing, file, directory} with their refinements), and
/// the chain registers each exactly once. Variants carry no state; all the
/// per-request facts live in the [`RequestContext`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Case {
    /// Nothing on disk at the resolved path.
    NoFile,
    /// A regular file named with the script extension; run it.
    ScriptFile,
    /// Any other regular file; serve its bytes.
    RegularFile,
    /// A directory with an `index.html`; serve the index file.
    DirectoryWithIndex,
    /// A directory without one; serve a generated listing.
    DirectoryWithoutIndex,
    /// Unconditional terminal state; keeps dispatch total.
    Fallback,
}

impl Case {
    /// Whether this case claims the request. Pure over the probe snapshot.
    pub fn matches(self, ctx: &RequestContext) -> bool {
        let probe = ctx.probe;
        match self {
            Self::NoFile => !probe.exists,
            Self::ScriptFile => probe.is_file && probe.is_script,
            Self::RegularFile => probe.is_file,
            Self::DirectoryWithIndex => probe.is_dir && probe.has_index,
            Self::DirectoryWithoutIndex => probe.is_dir && !probe.has_index,
            Self::Fallback => true,
        }
    }

    /// Produces this case's outcome. Only meaningful after [`matches`]
    /// succeeded; this is where the filesystem and process work happens.
    ///
    /// [`matches`]: Case::matches
    pub async fn execute(self, ctx: &RequestContext, config: &ServeConfig) -> Outcome {
        match self {
            Self::NoFile => Err(Error::NotFound(ctx.path.clone())),
            Self::ScriptFile => {
                let stdout = script::run(config, &ctx.full_path).await?;
                Ok(Content::ok(stdout))
            }
            Self::RegularFile => read_file(&ctx.full_path).await,
            Self::DirectoryWithIndex => read_file(&index_path(&ctx.full_path)).await,
            Self::DirectoryWithoutIndex => list_dir(ctx).await,
            Self::Fallback => Err(Error::Unknown(ctx.path.clone())),
        }
    }
}

/// Whole-file read, served as-is. The index case funnels through here too,
/// pointed at the nested `index.html`.
async fn read_file(path: &Path) -> Outcome {
    let bytes = tokio::fs::read(path).await.map_err(|source| Error::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Content::ok(bytes))
}

/// Directory listing: one bullet per entry, dot-prefixed names skipped,
/// enumeration order as the filesystem reports it.
async fn list_dir(ctx: &RequestContext) -> Outcome {
    let mut dir = tokio::fs::read_dir(&ctx.full_path)
        .await
        .map_err(|source| Error::List { path: ctx.path.clone(), source })?;

    let mut entries = Vec::new();
    while let Some(entry) = dir
        .next_entry()
        .await
        .map_err(|source| Error::List { path: ctx.path.clone(), source })?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with('.') {
            entries.push(name);
        }
    }

    Ok(Content::ok(response::listing_page(&entries).into_bytes()))
}

/// The ordered case list plus the configuration the actions need.
///
/// Built once at startup, never mutated afterward; safe to share across
/// concurrent connection tasks because it is read-only.
pub struct CaseChain {
    cases: Vec<Case>,
    config: ServeConfig,
}

impl CaseChain {
    /// The standard six-case chain in its fixed priority order.
    pub fn new(config: ServeConfig) -> Self {
        Self {
            cases: vec![
                Case::NoFile,
                Case::ScriptFile,
                Case::RegularFile,
                Case::DirectoryWithIndex,
                Case::DirectoryWithoutIndex,
                Case::Fallback,
            ],
            config,
        }
    }

    pub fn config(&self) -> &ServeConfig {
        &self.config
    }

    /// First-match-wins dispatch.
    ///
    /// The trailing error is unreachable while `Fallback` sits at the end
    /// of the list; it exists so the function stays total without a panic.
    pub async fn dispatch(&self, ctx: &RequestContext) -> Outcome {
        for case in &self.cases {
            if case.matches(ctx) {
                return case.execute(ctx, &self.config).await;
            }
        }
        Err(Error::Unknown(ctx.path.clone()))
    }

    /// The narrow contract the transport consumes: one request in, one
    /// wire-ready response out.
    ///
    /// Every dispatch failure is converted to the uniform error page here;
    /// nothing propagates upward, which is what lets the transport treat
    /// its service as infallible.
    pub async fn handle(
        &self,
        method: Method,
        path: String,
        remote_addr: SocketAddr,
    ) -> http::Response<Full<Bytes>> {
        let ctx = RequestContext::new(&self.config, method, path, remote_addr).await;

        let content = match self.dispatch(&ctx).await {
            Ok(content) => content,
            Err(err) => response::error_page(&ctx.path, &err),
        };

        info!(
            method = %ctx.method,
            path = %ctx.path,
            peer = %ctx.remote_addr,
            status = content.status.as_u16(),
            "dispatched"
        );

        response::to_http(content)
    }
}
