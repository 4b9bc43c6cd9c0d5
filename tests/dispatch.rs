//! End-to-end dispatch scenarios against a real directory tree.
//!
//! Each test builds its own scratch root under the system temp directory,
//! drives [`CaseChain::handle`] exactly the way the transport does, and
//! checks the status line, headers, and body bytes that would go out on
//! the wire.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use http::{Method, StatusCode, header};
use http_body_util::BodyExt;
use porch::{CaseChain, ServeConfig};

static NEXT_ROOT: AtomicU32 = AtomicU32::new(0);

/// Fresh directory under the system temp dir, unique per test.
fn scratch_root() -> PathBuf {
    let n = NEXT_ROOT.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("porch-test-{}-{n}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create scratch root");
    dir
}

fn chain_for(root: &Path) -> CaseChain {
    CaseChain::new(ServeConfig::new(root.display().to_string()))
}

fn peer() -> SocketAddr {
    "127.0.0.1:4000".parse().unwrap()
}

async fn request(chain: &CaseChain, method: Method, path: &str) -> (StatusCode, Vec<u8>) {
    let response = chain.handle(method, path.to_owned(), peer()).await;
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes()
        .to_vec();
    (status, body)
}

async fn get(chain: &CaseChain, path: &str) -> (StatusCode, Vec<u8>) {
    request(chain, Method::GET, path).await
}

#[tokio::test]
async fn serves_file_bytes_verbatim() {
    let root = scratch_root();
    std::fs::write(root.join("a.html"), "hi").unwrap();

    let (status, body) = get(&chain_for(&root), "/a.html").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"hi");

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn missing_path_is_a_404_naming_the_path() {
    let root = scratch_root();

    let (status, body) = get(&chain_for(&root), "/missing.txt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let body = String::from_utf8(body).unwrap();
    assert!(body.contains("Error accessing /missing.txt"));
    assert!(body.contains("/missing.txt not found"));

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn listing_includes_entries_and_skips_dot_files() {
    let root = scratch_root();
    std::fs::create_dir(root.join("docs")).unwrap();
    std::fs::write(root.join("docs/x.txt"), "x").unwrap();
    std::fs::write(root.join("docs/.hidden"), "secret").unwrap();

    let (status, body) = get(&chain_for(&root), "/docs").await;
    assert_eq!(status, StatusCode::OK);

    let body = String::from_utf8(body).unwrap();
    assert!(body.contains("<li>x.txt</li>"));
    assert!(!body.contains("hidden"));

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn directory_with_index_serves_the_index_file() {
    let root = scratch_root();
    std::fs::create_dir(root.join("docs")).unwrap();
    std::fs::write(root.join("docs/index.html"), "welcome").unwrap();
    std::fs::write(root.join("docs/other.txt"), "other").unwrap();

    let chain = chain_for(&root);

    let (status, via_dir) = get(&chain, "/docs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(via_dir, b"welcome");

    // Identical to requesting the index file directly.
    let (_, direct) = get(&chain, "/docs/index.html").await;
    assert_eq!(via_dir, direct);

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn script_stdout_becomes_the_body() {
    let root = scratch_root();
    std::fs::write(root.join("run.sh"), "printf ok").unwrap();

    let config = ServeConfig::new(root.display().to_string()).script(".sh", "sh");
    let chain = CaseChain::new(config);

    let (status, body) = get(&chain, "/run.sh").await;
    assert_eq!(status, StatusCode::OK);
    // The body is what the script printed, not the script's source text,
    // which also proves the script case outranks plain file serving.
    assert_eq!(body, b"ok");

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn failing_script_still_ships_its_partial_output() {
    let root = scratch_root();
    std::fs::write(root.join("half.sh"), "printf partial; exit 3").unwrap();

    let config = ServeConfig::new(root.display().to_string()).script(".sh", "sh");
    let chain = CaseChain::new(config);

    let (status, body) = get(&chain, "/half.sh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"partial");

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn every_response_is_html_with_an_exact_length() {
    let root = scratch_root();
    std::fs::write(root.join("a.html"), "hi").unwrap();

    let response = chain_for(&root)
        .handle(Method::GET, "/a.html".to_owned(), peer())
        .await;
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
    assert_eq!(response.headers()[header::CONTENT_LENGTH], "2");

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn classification_ignores_the_method() {
    let root = scratch_root();
    std::fs::write(root.join("a.html"), "hi").unwrap();

    let (status, body) = request(&chain_for(&root), Method::POST, "/a.html").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"hi");

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn traversal_segments_escape_the_root() {
    // Documented weakness, asserted so a silent fix would be noticed.
    let outer = scratch_root();
    let root = outer.join("www");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(outer.join("secret.txt"), "outside").unwrap();

    let (status, body) = get(&chain_for(&root), "/../secret.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"outside");

    let _ = std::fs::remove_dir_all(&outer);
}
