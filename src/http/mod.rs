//! HTTP protocol helpers, decoupled from the request-handling logic.

pub mod encoding;
pub mod headers;
pub mod mime;
pub mod response;

pub use headers::apply_no_cache;
pub use response::{
    build_400_response, build_404_response, build_405_response, build_file_response,
    build_html_response, build_redirect_response,
};
