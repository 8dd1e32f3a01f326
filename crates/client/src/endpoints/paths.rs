//! Path builders for the management endpoints the setup flow touches.

use crate::endpoints::url_encoding::encode_path_segment;

/// `/_ilm/policy/{name}`
pub fn ilm_policy(name: &str) -> String {
    format!("/_ilm/policy/{}", encode_path_segment(name))
}

/// `/_index_template/{name}`
pub fn index_template(name: &str) -> String {
    format!("/_index_template/{}", encode_path_segment(name))
}

/// `/_template/{name}`
pub fn legacy_template(name: &str) -> String {
    format!("/_template/{}", encode_path_segment(name))
}

/// `/_alias/{alias}`
pub fn alias(name: &str) -> String {
    format!("/_alias/{}", encode_path_segment(name))
}

/// `/{index}`
pub fn index(name: &str) -> String {
    format!("/{}", encode_path_segment(name))
}
