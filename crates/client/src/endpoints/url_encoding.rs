//! Percent-encoding for resource names interpolated into API paths.
//!
//! Template, policy, alias and index names are placed in a single path
//! segment. Encoding keeps a name like `a/b` from addressing a different
//! endpoint and keeps `?`/`#` from being read as query or fragment.
//!
//! ```
//! use estack_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("metrics-telemetry"), "metrics-telemetry");
//! assert_eq!(encode_path_segment("a/b"), "a%2Fb");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in URL path segments.
///
/// `@`, `-`, `.`, `_` and `:` are left alone since they appear in ordinary
/// component template and index names (`metrics-telemetry@custom`).
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for use as one URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}
