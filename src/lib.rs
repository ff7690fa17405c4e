//! Development static file server for a `dist` bundle.
//!
//! Serves a fixed directory over HTTP while forcing cache-defeating
//! response headers on every response, so browsers never reuse stale
//! assets between rebuilds.

pub mod cli;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
