//! End-to-end tests speaking raw HTTP to a running server instance.

use distserve::config::{HttpVersion, ServerConfig};
use distserve::server;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

fn fixture_root(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("distserve-it-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

async fn start_server(root: &Path, protocol: HttpVersion) -> SocketAddr {
    let config = ServerConfig {
        bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        protocol,
        root: root.canonicalize().unwrap(),
    };
    let listener = server::create_listener(config.socket_addr()).unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server::run_accept_loop(listener, Arc::new(config)));
    addr
}

/// Send a raw request and split the response into head and body.
async fn send_request(addr: SocketAddr, raw: &str) -> (String, Vec<u8>) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();

    let split = buf
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header/body separator");
    let head = String::from_utf8_lossy(&buf[..split]).to_lowercase();
    let body = buf[split + 4..].to_vec();
    (head, body)
}

fn get(path: &str) -> String {
    format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
}

fn assert_cache_defeated(head: &str) {
    assert!(
        head.contains("cache-control: no-cache, no-store, must-revalidate"),
        "missing Cache-Control in: {head}"
    );
    assert!(head.contains("pragma: no-cache"), "missing Pragma in: {head}");
    assert!(head.contains("expires: 0"), "missing Expires in: {head}");
}

#[tokio::test]
async fn serves_file_bytes_exactly() {
    let root = fixture_root("bytes");
    let payload: Vec<u8> = (0u8..=255).cycle().take(4096).collect();
    std::fs::write(root.join("blob.bin"), &payload).unwrap();
    let addr = start_server(&root, HttpVersion::Http11).await;

    let (head, body) = send_request(addr, &get("/blob.bin")).await;
    assert!(head.starts_with("http/1.1 200"), "unexpected head: {head}");
    assert!(head.contains("content-type: application/octet-stream"));
    assert_eq!(body, payload);
}

#[tokio::test]
async fn every_response_carries_cache_defeating_headers() {
    let root = fixture_root("headers");
    std::fs::write(root.join("app.js"), b"export {}").unwrap();
    std::fs::create_dir_all(root.join("sub")).unwrap();
    let addr = start_server(&root, HttpVersion::Http11).await;

    // 200 for a file
    let (head, _) = send_request(addr, &get("/app.js")).await;
    assert!(head.starts_with("http/1.1 200"));
    assert_cache_defeated(&head);

    // 404 for a missing path
    let (head, _) = send_request(addr, &get("/missing.css")).await;
    assert!(head.starts_with("http/1.1 404"));
    assert_cache_defeated(&head);

    // 301 for a directory without its trailing slash
    let (head, _) = send_request(addr, &get("/sub")).await;
    assert!(head.starts_with("http/1.1 301"));
    assert_cache_defeated(&head);

    // 405 for an unsupported method
    let post = "POST /app.js HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n";
    let (head, _) = send_request(addr, post).await;
    assert!(head.starts_with("http/1.1 405"));
    assert_cache_defeated(&head);
}

#[tokio::test]
async fn missing_path_returns_404() {
    let root = fixture_root("missing");
    let addr = start_server(&root, HttpVersion::Http11).await;

    let (head, _) = send_request(addr, &get("/no/such/file.html")).await;
    assert!(head.starts_with("http/1.1 404"));
}

#[tokio::test]
async fn traversal_attempt_returns_404() {
    let root = fixture_root("traversal");
    let addr = start_server(&root, HttpVersion::Http11).await;

    let (head, _) = send_request(addr, &get("/../../etc/passwd")).await;
    assert!(head.starts_with("http/1.1 404"), "unexpected head: {head}");

    // same attempt hidden behind percent-encoding
    let (head, _) = send_request(addr, &get("/%2e%2e/%2e%2e/etc/passwd")).await;
    assert!(head.starts_with("http/1.1 404"), "unexpected head: {head}");
}

#[tokio::test]
async fn directory_with_index_serves_it() {
    let root = fixture_root("index");
    std::fs::write(root.join("index.html"), b"<h1>home</h1>").unwrap();
    let addr = start_server(&root, HttpVersion::Http11).await;

    let (head, body) = send_request(addr, &get("/")).await;
    assert!(head.starts_with("http/1.1 200"));
    assert!(head.contains("content-type: text/html"));
    assert_eq!(body, b"<h1>home</h1>");
}

#[tokio::test]
async fn directory_without_index_gets_generated_listing() {
    let root = fixture_root("listing");
    std::fs::write(root.join("main.css"), b"body{}").unwrap();
    std::fs::create_dir_all(root.join("assets")).unwrap();
    let addr = start_server(&root, HttpVersion::Http11).await;

    let (head, body) = send_request(addr, &get("/")).await;
    assert!(head.starts_with("http/1.1 200"));
    assert!(head.contains("content-type: text/html"));
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Directory listing for /"));
    assert!(html.contains("main.css"));
    assert!(html.contains("assets/"));
}

#[tokio::test]
async fn directory_redirect_appends_slash() {
    let root = fixture_root("redirect");
    std::fs::create_dir_all(root.join("assets")).unwrap();
    std::fs::write(root.join("assets/index.html"), b"ok").unwrap();
    let addr = start_server(&root, HttpVersion::Http11).await;

    let (head, _) = send_request(addr, &get("/assets")).await;
    assert!(head.starts_with("http/1.1 301"));
    assert!(head.contains("location: /assets/"));
}

#[tokio::test]
async fn head_gets_headers_without_body() {
    let root = fixture_root("head");
    std::fs::write(root.join("page.html"), b"<p>hello</p>").unwrap();
    let addr = start_server(&root, HttpVersion::Http11).await;

    let raw = "HEAD /page.html HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n";
    let (head, body) = send_request(addr, raw).await;
    assert!(head.starts_with("http/1.1 200"));
    assert!(head.contains("content-length: 12"));
    assert_cache_defeated(&head);
    assert!(body.is_empty());
}

#[tokio::test]
async fn http10_mode_stamps_responses() {
    let root = fixture_root("proto10");
    std::fs::write(root.join("a.txt"), b"ten").unwrap();
    let addr = start_server(&root, HttpVersion::Http10).await;

    let raw = "GET /a.txt HTTP/1.0\r\nHost: localhost\r\n\r\n";
    let (head, body) = send_request(addr, raw).await;
    assert!(head.starts_with("http/1.0 200"), "unexpected head: {head}");
    assert_cache_defeated(&head);
    assert_eq!(body, b"ten");
}

#[tokio::test]
async fn percent_encoded_names_resolve() {
    let root = fixture_root("encoded");
    std::fs::write(root.join("my file.txt"), b"spaced").unwrap();
    let addr = start_server(&root, HttpVersion::Http11).await;

    let (head, body) = send_request(addr, &get("/my%20file.txt")).await;
    assert!(head.starts_with("http/1.1 200"), "unexpected head: {head}");
    assert_eq!(body, b"spaced");
}

#[tokio::test]
async fn occupied_port_fails_to_bind() {
    let root = fixture_root("bindconflict");
    let addr = start_server(&root, HttpVersion::Http11).await;

    assert!(server::create_listener(addr).is_err());
}
