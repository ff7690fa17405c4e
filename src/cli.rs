//! Command line interface.

use crate::config::HttpVersion;
use clap::Parser;
use std::net::IpAddr;

/// Serve the `dist` directory next to this executable over HTTP,
/// with client-side caching disabled.
#[derive(Debug, Parser)]
#[command(name = "distserve", version, about)]
pub struct Args {
    /// Bind to this address (default: all interfaces)
    #[arg(short, long, value_name = "ADDRESS")]
    pub bind: Option<IpAddr>,

    /// Conform to this HTTP version
    #[arg(short, long, value_name = "VERSION", default_value_t = HttpVersion::Http10)]
    pub protocol: HttpVersion,

    /// Bind to this port
    #[arg(value_name = "PORT", default_value_t = 8000)]
    pub port: u16,
}
