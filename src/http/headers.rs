//! Cache-defeating response headers.
//!
//! Every response this server sends must tell clients and intermediaries
//! not to store or reuse it, so that rebuilt assets are always refetched.

use hyper::header::{HeaderMap, HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};

pub const CACHE_CONTROL_VALUE: &str = "no-cache, no-store, must-revalidate";
pub const PRAGMA_VALUE: &str = "no-cache";
pub const EXPIRES_VALUE: &str = "0";

/// Inject the cache-defeating headers.
///
/// Called once at the response exit point, after all other headers are
/// set. Overwrites any prior value for the same header names.
pub fn apply_no_cache(headers: &mut HeaderMap) {
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_VALUE));
    headers.insert(PRAGMA, HeaderValue::from_static(PRAGMA_VALUE));
    headers.insert(EXPIRES, HeaderValue::from_static(EXPIRES_VALUE));
}
