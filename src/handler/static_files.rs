//! Static file serving module
//!
//! Handles document-root path resolution, file loading, and response
//! building with conditional and range request support.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, range::RangeOutcome};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve a request path from the configured document root.
pub async fn serve(
    ctx: &RequestContext<'_>,
    static_dir: &str,
    index_files: &[String],
) -> Response<Full<Bytes>> {
    let Some(file_path) = resolve_within(Path::new(static_dir), ctx.path, index_files) else {
        return http::build_404_response();
    };

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            return http::build_404_response();
        }
    };

    let content_type = mime::content_type_for(file_path.extension().and_then(|e| e.to_str()));
    build_static_file_response(
        &content,
        content_type,
        ctx.if_none_match.as_deref(),
        ctx.is_head,
        ctx.range_header.as_deref(),
    )
}

/// Resolve a request path to a file inside the document root.
///
/// Directory requests fall back to the first matching index file. Paths
/// whose canonical form escapes the root (`..` traversal, symlinks out)
/// resolve to None.
pub fn resolve_within(root: &Path, request_path: &str, index_files: &[String]) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    let mut file_path = root.join(relative);

    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{}': {e}",
                root.display()
            ));
            return None;
        }
    };

    // Directory requests try the configured index files
    if file_path.is_dir() || relative.is_empty() || relative.ends_with('/') {
        let index = index_files.iter().find_map(|name| {
            let candidate = file_path.join(name);
            candidate.is_file().then_some(candidate)
        })?;
        file_path = index;
    }

    // Missing files are a routine 404, not worth a log line
    let file_canonical = file_path.canonicalize().ok()?;
    if !file_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            file_canonical.display()
        ));
        return None;
    }

    file_canonical.is_file().then_some(file_canonical)
}

/// Build static file response with `ETag` and Range support
fn build_static_file_response(
    data: &[u8],
    content_type: &str,
    if_none_match: Option<&str>,
    is_head: bool,
    range_header: Option<&str>,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(data);
    let total_size = data.len();

    // Check if client has cached version
    if cache::etag_matches(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    // Check for Range request
    match http::parse_range_header(range_header, total_size) {
        RangeOutcome::Valid(range) => {
            let start = range.start;
            let end = range.end_position(total_size);

            let body = if is_head {
                Bytes::new()
            } else {
                Bytes::from(data[start..=end].to_vec())
            };

            return http::response::build_partial_response(
                body,
                content_type,
                &etag,
                start,
                end,
                total_size,
                is_head,
            );
        }
        RangeOutcome::NotSatisfiable => {
            return http::build_416_response(total_size);
        }
        RangeOutcome::None => {
            // No Range header or malformed, return full content
        }
    }

    // Full response
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(data.to_owned())
    };

    http::response::build_cached_response(body, content_type, &etag, is_head)
}
