use crate::config::{HttpVersion, ServerConfig};
use chrono::Local;
use std::net::SocketAddr;

fn timestamp() -> String {
    Local::now().format("%d/%b/%Y %H:%M:%S").to_string()
}

pub fn log_server_start(addr: &SocketAddr, config: &ServerConfig) {
    println!("======================================");
    println!("Serving {} ({})", config.root.display(), config.protocol);
    println!("Listening on: http://{addr}");
    println!("Caching is disabled on every response");
    println!("Press Ctrl+C to stop");
    println!("======================================\n");
}

/// One access-log line per completed request.
pub fn log_access(
    peer: &SocketAddr,
    method: &str,
    path: &str,
    version: HttpVersion,
    status: u16,
    body_bytes: u64,
) {
    println!(
        "{} - - [{}] \"{} {} {}\" {} {}",
        peer.ip(),
        timestamp(),
        method,
        path,
        version,
        status,
        body_bytes
    );
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_shutdown() {
    println!("\nInterrupt received, shutting down");
}
