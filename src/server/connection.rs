//! Connection accept loop.

use crate::config::ServerConfig;
use crate::handler;
use crate::logger;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

/// Accept connections forever, serving each on its own task.
///
/// Accept errors are logged and the loop continues; there is no shared
/// mutable state between connections, so no ordering is imposed.
pub async fn run_accept_loop(
    listener: TcpListener,
    config: Arc<ServerConfig>,
) -> std::io::Result<()> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                handle_connection(stream, peer_addr, Arc::clone(&config));
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}

/// Serve a single connection on a spawned task.
fn handle_connection(stream: TcpStream, peer_addr: std::net::SocketAddr, config: Arc<ServerConfig>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let mut builder = http1::Builder::new();
        builder.keep_alive(config.protocol.keep_alive());

        let service = service_fn(move |req| {
            let config = Arc::clone(&config);
            async move { handler::handle_request(req, peer_addr, config).await }
        });

        if let Err(err) = builder.serve_connection(io, service).await {
            logger::log_connection_error(&err);
        }
    });
}
