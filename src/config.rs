use std::fmt;
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::cli::Args;

/// Default documents tried when a directory is requested.
pub const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// HTTP protocol version the server conforms to.
///
/// `HTTP/1.0` responses disable connection keep-alive, `HTTP/1.1`
/// responses keep the connection open by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVersion {
    Http10,
    Http11,
}

impl HttpVersion {
    /// Map to the version stamped on outgoing responses.
    pub const fn hyper_version(self) -> hyper::Version {
        match self {
            Self::Http10 => hyper::Version::HTTP_10,
            Self::Http11 => hyper::Version::HTTP_11,
        }
    }

    /// Whether connections stay open between requests.
    pub const fn keep_alive(self) -> bool {
        matches!(self, Self::Http11)
    }
}

impl FromStr for HttpVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HTTP/1.0" | "1.0" => Ok(Self::Http10),
            "HTTP/1.1" | "1.1" => Ok(Self::Http11),
            other => Err(format!(
                "unsupported HTTP version '{other}' (expected HTTP/1.0 or HTTP/1.1)"
            )),
        }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http10 => write!(f, "HTTP/1.0"),
            Self::Http11 => write!(f, "HTTP/1.1"),
        }
    }
}

/// Resolved server configuration.
///
/// There is no config file and no environment lookup: the CLI flags are
/// the entire configuration surface.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
    pub protocol: HttpVersion,
    /// Canonicalized root of the served tree. All resolved request paths
    /// must stay within this directory.
    pub root: PathBuf,
}

impl ServerConfig {
    /// Build the configuration from parsed CLI arguments.
    ///
    /// Changes the working directory into the `dist` directory next to
    /// the executable and canonicalizes it as the serving root. A missing
    /// `dist` directory is a fatal startup error.
    pub fn from_args(args: &Args) -> io::Result<Self> {
        let root = dist_root()?;
        std::env::set_current_dir(&root)?;
        let root = root.canonicalize()?;

        Ok(Self {
            bind: args.bind.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: args.port,
            protocol: args.protocol,
            root,
        })
    }

    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// Locate the `dist` directory relative to the executable's own location.
fn dist_root() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "executable has no parent directory",
        )
    })?;
    Ok(dir.join("dist"))
}
