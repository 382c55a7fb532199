//! HTTP Range header parsing module
//!
//! Single-range `bytes=` parsing (RFC 7233 subset) for partial content
//! responses.

/// A byte range resolved against a known entity size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte position (inclusive)
    pub start: usize,
    /// Last byte position (inclusive), None means to end of entity
    pub end: Option<usize>,
}

impl ByteRange {
    /// Resolve the inclusive end position for an entity of `total` bytes.
    #[inline]
    pub fn end_position(&self, total: usize) -> usize {
        self.end.unwrap_or_else(|| total.saturating_sub(1))
    }

    /// Number of bytes the range covers.
    #[cfg(test)]
    pub fn byte_count(&self, total: usize) -> usize {
        self.end_position(total).saturating_sub(self.start) + 1
    }
}

/// Outcome of parsing a Range header.
#[derive(Debug)]
pub enum RangeOutcome {
    /// A single satisfiable range
    Valid(ByteRange),
    /// Syntactically valid but out of bounds, respond 416
    NotSatisfiable,
    /// Absent, malformed, or multi-range: serve the full entity
    None,
}

/// Parse a Range header against an entity of `total` bytes.
///
/// Accepted forms (bytes unit only, single range only):
/// - `bytes=0-99` fixed span
/// - `bytes=100-` open-ended
/// - `bytes=-50` final 50 bytes
///
/// Anything else, including multi-range requests, is treated as if no
/// Range header were present.
///
/// # Examples
/// ```
/// use helloserv::http::range::{parse_range_header, RangeOutcome};
///
/// assert!(matches!(parse_range_header(Some("bytes=0-99"), 1000), RangeOutcome::Valid(_)));
/// assert!(matches!(parse_range_header(None, 1000), RangeOutcome::None));
/// assert!(matches!(parse_range_header(Some("bytes=2000-"), 1000), RangeOutcome::NotSatisfiable));
/// ```
pub fn parse_range_header(range_header: Option<&str>, total: usize) -> RangeOutcome {
    let Some(spec) = range_header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::None;
    };

    if spec.contains(',') {
        // Multi-range is legal HTTP but out of scope; fall back to full body
        return RangeOutcome::None;
    }

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return RangeOutcome::None;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if start_str.is_empty() {
        return parse_suffix(end_str, total);
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::None;
    };
    if start >= total {
        return RangeOutcome::NotSatisfiable;
    }

    let end = if end_str.is_empty() {
        None
    } else {
        match end_str.parse::<usize>() {
            // Ends past the entity are clamped per RFC 7233
            Ok(e) => Some(e.min(total - 1)),
            Err(_) => return RangeOutcome::None,
        }
    };

    if end.is_some_and(|e| start > e) {
        return RangeOutcome::NotSatisfiable;
    }

    RangeOutcome::Valid(ByteRange { start, end })
}

/// Parse a suffix range such as `-50` (the final 50 bytes).
fn parse_suffix(suffix_str: &str, total: usize) -> RangeOutcome {
    let Ok(suffix) = suffix_str.parse::<usize>() else {
        return RangeOutcome::None;
    };
    // A zero-length entity has no satisfiable range (RFC 7233 section 2.1)
    if suffix == 0 || total == 0 {
        return RangeOutcome::NotSatisfiable;
    }
    // A suffix longer than the entity selects the whole entity
    RangeOutcome::Valid(ByteRange {
        start: total.saturating_sub(suffix),
        end: Some(total.saturating_sub(1)),
    })
}
