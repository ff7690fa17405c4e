//! Static file serving.
//!
//! Translates request paths into filesystem reads under the configured
//! root, with the cache-defeating headers injected on every response.

use crate::config::{ServerConfig, INDEX_FILES};
use crate::handler::listing;
use crate::http::{self, encoding, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::{Body, Bytes, Incoming};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    peer: SocketAddr,
    config: Arc<ServerConfig>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let is_head = method == Method::HEAD;

    let mut response = match method {
        Method::GET | Method::HEAD => serve_path(&config, &path, is_head).await,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response()
        }
    };

    // Single exit point: every response, whatever its status, leaves with
    // caching defeated and the configured protocol version stamped on it.
    http::apply_no_cache(response.headers_mut());
    *response.version_mut() = config.protocol.hyper_version();

    let body_bytes = response.body().size_hint().exact().unwrap_or(0);
    logger::log_access(
        &peer,
        method.as_str(),
        &path,
        config.protocol,
        response.status().as_u16(),
        body_bytes,
    );

    Ok(response)
}

/// Resolve a request path and serve the file, index document, or listing
/// behind it.
async fn serve_path(config: &ServerConfig, raw_path: &str, is_head: bool) -> Response<Full<Bytes>> {
    let Some(decoded) = encoding::percent_decode(raw_path) else {
        logger::log_warning(&format!("Malformed percent-encoding in path: {raw_path}"));
        return http::build_400_response();
    };

    let Some(full_path) = resolve_path(&config.root, &decoded) else {
        return http::build_404_response();
    };

    if full_path.is_dir() {
        // Directories are always addressed with a trailing slash so that
        // relative links inside index documents and listings resolve.
        if !decoded.ends_with('/') {
            return http::build_redirect_response(&format!("{raw_path}/"));
        }

        for index_file in INDEX_FILES {
            let candidate = full_path.join(index_file);
            if candidate.is_file() {
                return serve_file(&candidate, is_head).await;
            }
        }

        return listing::serve_listing(&full_path, &decoded, is_head).await;
    }

    serve_file(&full_path, is_head).await
}

/// Resolve a decoded request path against the serving root.
///
/// Returns `None` when the path does not exist or when the canonicalized
/// result escapes the root (traversal attempts, symlinks pointing out).
fn resolve_path(root: &Path, decoded_path: &str) -> Option<PathBuf> {
    let relative = decoded_path.trim_start_matches('/');
    let joined = root.join(relative);

    // Nonexistent paths fail to canonicalize, which is the common 404.
    let canonical = joined.canonicalize().ok()?;

    if canonical.starts_with(root) {
        Some(canonical)
    } else {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            decoded_path,
            canonical.display()
        ));
        None
    }
}

/// Read a file and wrap it in a 200 response with an inferred content type.
async fn serve_file(path: &Path, is_head: bool) -> Response<Full<Bytes>> {
    match fs::read(path).await {
        Ok(content) => {
            let content_type = mime::get_content_type(path.extension().and_then(|e| e.to_str()));
            http::build_file_response(content, content_type, is_head)
        }
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            http::build_404_response()
        }
    }
}
