//! HTTP cache validation module
//!
//! Provides weak `ETag` generation and `If-None-Match` evaluation for
//! conditional requests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a weak `ETag` for a response body.
///
/// The tag combines the content length and a fast content hash, e.g.
/// `W/"1a4-9f8e22d1c3b07a55"`. Weak tags are sufficient here: byte-range
/// and compression variants of the same entity are never served.
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("W/\"{:x}-{:x}\"", content.len(), hasher.finish())
}

/// Evaluate a client `If-None-Match` header against the server `ETag`.
///
/// Comparison is weak (RFC 7232 section 3.2): a `W/` prefix on either
/// side is ignored. Supports comma-separated tag lists and the `*`
/// wildcard.
///
/// Returns true when the entity is unchanged and a 304 should be sent.
pub fn etag_matches(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|header| {
        header
            .split(',')
            .map(str::trim)
            .any(|candidate| candidate == "*" || strip_weak(candidate) == strip_weak(etag))
    })
}

fn strip_weak(tag: &str) -> &str {
    tag.strip_prefix("W/").unwrap_or(tag)
}
