//! DIDL-Lite metadata extraction.
//!
//! Track and channel metadata travels as a small DIDL-Lite document embedded
//! as text in the outer reply (or supplied by the caller when queueing).
//! Only the fields the control point needs are read: title, album art and
//! the playable resource URI.

use crate::error::{DsError, DsResult};
use crate::openhome::types::TrackFields;
use crate::openhome::xml::{FieldValue, XmlElement};

/// Extracts title, artwork and resource URI from a DIDL-Lite document.
///
/// Each field may be a plain text node or an attributed node such as
/// `<res protocolInfo="http-get:*:audio/mpeg:*">…</res>`; both yield the
/// text. When `res` repeats, the first resource wins. Missing or empty
/// fields come back as `None`, and a blank document yields all `None`.
///
/// # Errors
/// Returns `DsError::Decode` carrying the raw document if it is not
/// well-formed XML.
pub fn extract_track_fields(xml: &str) -> DsResult<TrackFields> {
    if xml.trim().is_empty() {
        return Ok(TrackFields::default());
    }

    let root = XmlElement::parse(xml).map_err(|e| DsError::decode("DIDL-Lite metadata", e, xml))?;

    let Some(item) = root.child("item") else {
        log::debug!("[DIDL] Metadata has no <item> element: {}", root.name());
        return Ok(TrackFields::default());
    };

    Ok(TrackFields {
        title: field_text(item, "title"),
        artwork: field_text(item, "albumArtURI"),
        uri: field_text(item, "res"),
    })
}

/// Returns the playable URI of a caller-supplied metadata document.
///
/// Unparseable metadata and metadata without a usable `res` both yield
/// `None`; the caller reports them as invalid input.
#[must_use]
pub fn playable_uri(xml: &str) -> Option<String> {
    match extract_track_fields(xml) {
        Ok(fields) => fields.uri,
        Err(e) => {
            log::debug!("[DIDL] Could not read resource URI: {}", e);
            None
        }
    }
}

fn field_text(item: &XmlElement, local: &str) -> Option<String> {
    item.field(local)
        .map(|field: FieldValue<'_>| field.text().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openhome::test_fixtures::{
        didl_item, CHANNEL_DIDL_ATTRIBUTED, CHANNEL_DIDL_PLAIN, TRACK_DIDL_MULTI_RES,
    };

    #[test]
    fn extracts_plain_fields() {
        let fields = extract_track_fields(CHANNEL_DIDL_PLAIN).expect("valid");
        assert_eq!(fields.title.as_deref(), Some("Jazz FM"));
        assert_eq!(fields.artwork.as_deref(), Some("http://img.example/jazz.png"));
        assert_eq!(fields.uri.as_deref(), Some("http://stream.example/jazz"));
    }

    #[test]
    fn attributed_and_plain_shapes_yield_identical_fields() {
        let plain = extract_track_fields(CHANNEL_DIDL_PLAIN).expect("valid");
        let attributed = extract_track_fields(CHANNEL_DIDL_ATTRIBUTED).expect("valid");
        assert_eq!(plain, attributed);
    }

    #[test]
    fn fields_detect_shape_independently() {
        let xml = didl_item(
            r#"<dc:title>Mixed</dc:title><upnp:albumArtURI dlna:profileID="PNG_LRG">http://img/a.png</upnp:albumArtURI><res>http://s/1</res>"#,
        );
        let fields = extract_track_fields(&xml).expect("valid");
        assert_eq!(fields.title.as_deref(), Some("Mixed"));
        assert_eq!(fields.artwork.as_deref(), Some("http://img/a.png"));
        assert_eq!(fields.uri.as_deref(), Some("http://s/1"));
    }

    #[test]
    fn first_resource_wins_when_repeated() {
        let fields = extract_track_fields(TRACK_DIDL_MULTI_RES).expect("valid");
        assert_eq!(fields.uri.as_deref(), Some("http://media.example/track.flac"));
    }

    #[test]
    fn missing_fields_are_none() {
        let fields = extract_track_fields(&didl_item("<dc:title>Only title</dc:title>")).expect("valid");
        assert_eq!(fields.title.as_deref(), Some("Only title"));
        assert!(fields.artwork.is_none());
        assert!(fields.uri.is_none());
    }

    #[test]
    fn blank_document_yields_empty_fields() {
        assert_eq!(extract_track_fields("").expect("valid"), TrackFields::default());
    }

    #[test]
    fn malformed_document_carries_raw_text() {
        let raw = "<DIDL-Lite><item><dc:title>Broken</item>";
        match extract_track_fields(raw).unwrap_err() {
            DsError::Decode { raw: carried, .. } => assert_eq!(carried, raw),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn content_after_document_is_decode_error() {
        let raw = "<DIDL-Lite><item><res>http://a/1</res></item></DIDL-Lite>garbage";
        assert!(matches!(extract_track_fields(raw), Err(DsError::Decode { .. })));
        assert!(playable_uri(raw).is_none());
    }

    #[test]
    fn playable_uri_handles_scalar_attributed_and_repeated_res() {
        assert_eq!(
            playable_uri(&didl_item("<res>http://a/1</res>")).as_deref(),
            Some("http://a/1")
        );
        assert_eq!(
            playable_uri(&didl_item(r#"<res protocolInfo="http-get:*:audio/flac:*">http://a/2</res>"#))
                .as_deref(),
            Some("http://a/2")
        );
        assert_eq!(
            playable_uri(TRACK_DIDL_MULTI_RES).as_deref(),
            Some("http://media.example/track.flac")
        );
    }

    #[test]
    fn playable_uri_is_none_without_resource_or_on_garbage() {
        assert!(playable_uri(&didl_item("<dc:title>No res</dc:title>")).is_none());
        assert!(playable_uri(&didl_item("<res></res>")).is_none());
        assert!(playable_uri("not xml at all <").is_none());
    }
}
