//! REST API endpoint implementations.

mod cluster;
pub mod paths;
mod raw;
mod request;
pub mod url_encoding;

pub use cluster::get_cluster_info;
pub use raw::send_json;
pub use request::send_request_with_retry;
