//! Storage-path-safe keys for remote collections.

/// Characters the media backend rejects in a path segment.
const RESERVED: [char; 5] = ['.', '#', '$', '[', ']'];

/// Replace every reserved character with `_`.
///
/// Idempotent: `_` is never reserved, so sanitizing twice changes nothing.
pub fn sanitize_key(raw: &str) -> String {
    raw.chars()
        .map(|c| if RESERVED.contains(&c) { '_' } else { c })
        .collect()
}
