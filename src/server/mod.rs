//! Server module: listener construction and the connection accept loop.

pub mod connection;
pub mod listener;

pub use connection::run_accept_loop;
pub use listener::create_listener;
