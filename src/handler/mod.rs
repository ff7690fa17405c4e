//! Request handling: dispatch, static file resolution, directory listings.

pub mod listing;
pub mod static_files;

pub use static_files::handle_request;
