//! Outcome rendering: bytes and a status out, one fixed content type.
//!
//! Every response leaves through here, which is why the rules are few and
//! absolute: `Content-Type` is always `text/html` (file bytes and script
//! stdout included; there is no MIME table), and `Content-Length` is the
//! exact byte count of the body. Strings are UTF-8 encoded before the
//! length is computed; binary content passes through untouched.

use bytes::Bytes;
use http::{Response, StatusCode, header};
use http_body_util::Full;
use tracing::error;

use crate::error::Error;

/// Content to send back to the client: a status and the body bytes.
#[derive(Debug)]
pub struct Content {
    pub status: StatusCode,
    pub body: Bytes,
}

impl Content {
    /// `200 OK` with the given body.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self { status: StatusCode::OK, body: body.into() }
    }

    pub fn with_status(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self { status, body: body.into() }
    }
}

/// Fixed shell for a directory listing: one `<li>` per entry, newline
/// joined, in whatever order the filesystem enumerated them.
pub(crate) fn listing_page(entries: &[String]) -> String {
    let bullets = entries
        .iter()
        .map(|entry| format!("<li>{entry}</li>"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("<html>\n<body>\n<ul>\n{bullets}\n</ul>\n</body>\n</html>\n")
}

/// The uniform error page: the request path in the heading, the failure
/// message in the body, status 404 regardless of the failure class.
pub(crate) fn error_page(path: &str, error: &Error) -> Content {
    let body = format!(
        "<html>\n<body>\n<h1>Error accessing {path}</h1>\n<p>{error}</p>\n</body>\n</html>\n"
    );
    Content::with_status(StatusCode::NOT_FOUND, body.into_bytes())
}

/// Converts a [`Content`] into the wire response.
pub(crate) fn to_http(content: Content) -> Response<Full<Bytes>> {
    let length = content.body.len();
    Response::builder()
        .status(content.status)
        .header(header::CONTENT_TYPE, "text/html")
        .header(header::CONTENT_LENGTH, length)
        .body(Full::new(content.body))
        .unwrap_or_else(|e| {
            error!("failed to build response: {e}");
            Response::new(Full::new(Bytes::new()))
        })
}
