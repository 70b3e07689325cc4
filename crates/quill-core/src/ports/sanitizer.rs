//! HTML sanitizer port.

/// Allow-list based HTML filter.
///
/// Every user-authored body field goes through `sanitize` before it is
/// persisted - this is the system's only injection defense.
pub trait HtmlSanitizer: Send + Sync {
    /// Strip disallowed tags and attributes from raw HTML.
    fn sanitize(&self, raw_html: &str) -> String;
}
