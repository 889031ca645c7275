//! Text encoding helpers for SOAP argument bodies.

// ─────────────────────────────────────────────────────────────────────────────
// XML Encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Escapes text for embedding as element content in a SOAP argument body.
///
/// Replaces `&`, `<`, `>` and `"` with their entities, `&` first so already
/// produced entities are not escaped twice. Single quotes are left alone;
/// OpenHome devices store the metadata verbatim and compare URIs textually.
///
/// # Example
/// ```ignore
/// assert_eq!(encode("Tom & Jerry"), "Tom &amp; Jerry");
/// assert_eq!(encode("<res>"), "&lt;res&gt;");
/// ```
#[must_use]
pub fn encode(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Formats slot ids as the space-separated `IdList` argument value.
#[must_use]
pub fn id_list_value(ids: &[u32]) -> String {
    ids.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
