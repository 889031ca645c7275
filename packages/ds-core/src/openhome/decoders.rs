//! Reply decoders, one per OpenHome action reply shape.
//!
//! Each decoder takes the parsed outer [`Envelope`] and returns a fully
//! populated value or a descriptive [`DsError`]. Replies that embed a second
//! XML document as text (`SourceXml`, `ReadList`) are parsed again here, and
//! every list goes through [`Shape::into_vec`](crate::openhome::xml::Shape::into_vec)
//! so a one-entry list is never mistaken for a scalar.

use crate::error::{DsError, DsResult};
use crate::openhome::didl::extract_track_fields;
use crate::openhome::id_array::decode_id_array;
use crate::openhome::types::{RadioChannel, Source, Track};
use crate::openhome::xml::{Envelope, XmlElement};

// ─────────────────────────────────────────────────────────────────────────────
// Flat Replies
// ─────────────────────────────────────────────────────────────────────────────

/// Decodes an Info `Track` reply.
///
/// # Errors
/// `NotFound("No track found")` when `Uri` is absent or empty.
pub fn decode_track(envelope: &Envelope) -> DsResult<Track> {
    let response = envelope.response("TrackResponse");

    let uri = response
        .and_then(|r| r.child_text("Uri"))
        .filter(|uri| !uri.is_empty())
        .ok_or_else(|| DsError::not_found("No track found"))?;

    let metadata = response
        .and_then(|r| r.child_raw_text("Metadata"))
        .unwrap_or_default();

    Ok(Track {
        uri: uri.to_string(),
        metadata: metadata.to_string(),
    })
}

/// Decodes a Playlist `Insert` reply into the id of the new entry.
///
/// # Errors
/// `NotFound("No NewId Found")` when the response or field is absent,
/// `Decode` when the id is not a number.
pub fn decode_new_id(envelope: &Envelope) -> DsResult<u32> {
    let new_id = envelope
        .response("InsertResponse")
        .and_then(|r| r.child_text("NewId"))
        .ok_or_else(|| DsError::not_found("No NewId Found"))?;

    new_id
        .parse()
        .map_err(|e| DsError::decode("NewId", e, new_id))
}

/// Decodes a Product `Standby` reply, passing the value through unconverted.
///
/// # Errors
/// `NotFound` when the response carries no `Value`.
pub fn decode_standby(envelope: &Envelope) -> DsResult<String> {
    envelope
        .response("StandbyResponse")
        .and_then(|r| r.child_text("Value"))
        .map(str::to_string)
        .ok_or_else(|| DsError::not_found("No Standby value Found"))
}

/// Decodes a Playlist or Radio `IdArray` reply.
///
/// # Errors
/// `NotFound` when the response is absent, `Decode` for a malformed blob.
pub fn decode_id_array_response(envelope: &Envelope) -> DsResult<Vec<u32>> {
    let response = envelope
        .response("IdArrayResponse")
        .ok_or_else(|| DsError::not_found("No IdArray Found"))?;

    decode_id_array(response.child_text("Array").unwrap_or_default())
}

// ─────────────────────────────────────────────────────────────────────────────
// Embedded Document Replies
// ─────────────────────────────────────────────────────────────────────────────

/// Decodes a Product `SourceXml` reply.
///
/// # Errors
/// `NotFound("No sourceXml Found")` when the response is absent, `Decode`
/// when the embedded `SourceList` is malformed.
pub fn decode_source_list(envelope: &Envelope) -> DsResult<Vec<Source>> {
    let response = envelope
        .response("SourceXmlResponse")
        .ok_or_else(|| DsError::not_found("No sourceXml Found"))?;

    parse_source_list(response.child_text("Value").unwrap_or_default())
}

/// Parses an embedded `SourceList` document.
///
/// `Visible` is compared case-insensitively against `"true"`; a missing flag
/// reads as not visible.
pub fn parse_source_list(xml: &str) -> DsResult<Vec<Source>> {
    let Some(list) = parse_embedded(xml, "SourceList")? else {
        return Ok(Vec::new());
    };

    let sources = list.shape("Source");
    log::debug!("[DS] SourceList has {} sources", sources.len());

    Ok(sources
        .into_vec()
        .into_iter()
        .map(|source| Source {
            name: source.child_text("Name").unwrap_or_default().to_string(),
            source_type: source.child_text("Type").unwrap_or_default().to_string(),
            visible: source
                .child_text("Visible")
                .is_some_and(|v| v.eq_ignore_ascii_case("true")),
        })
        .collect())
}

/// Decodes a Playlist `ReadList` reply.
///
/// # Errors
/// `NotFound` when the response is absent, `Decode` when the embedded
/// `TrackList` is malformed.
pub fn decode_track_list(envelope: &Envelope) -> DsResult<Vec<Track>> {
    let response = envelope
        .response("ReadListResponse")
        .ok_or_else(|| DsError::not_found("No TrackList Found"))?;

    parse_track_list(response.child_text("TrackList").unwrap_or_default())
}

/// Parses an embedded `TrackList` document. Zero entries is an empty list.
///
/// Metadata is returned byte for byte; an entry without `Uri` decodes with an
/// empty uri and is logged.
pub fn parse_track_list(xml: &str) -> DsResult<Vec<Track>> {
    let Some(list) = parse_embedded(xml, "TrackList")? else {
        return Ok(Vec::new());
    };

    let entries = list.shape("Entry");
    log::debug!("[DS] TrackList has {} entries", entries.len());

    Ok(entries
        .into_vec()
        .into_iter()
        .map(|entry| {
            let uri = entry.child_text("Uri").unwrap_or_default();
            if uri.is_empty() {
                log::warn!(
                    "[DS] TrackList entry {} has no Uri",
                    entry.child_text("Id").unwrap_or("?")
                );
            }
            Track {
                uri: uri.to_string(),
                metadata: entry.child_raw_text("Metadata").unwrap_or_default().to_string(),
            }
        })
        .collect())
}

/// Decodes a Radio `ReadList` reply.
///
/// # Errors
/// `NotFound` when the response is absent, `Decode` when the embedded
/// `ChannelList`, an entry id, or an entry's metadata is malformed.
pub fn decode_channel_list(envelope: &Envelope) -> DsResult<Vec<RadioChannel>> {
    let response = envelope
        .response("ReadListResponse")
        .ok_or_else(|| DsError::not_found("No ChannelList Found"))?;

    parse_channel_list(response.child_text("ChannelList").unwrap_or_default())
}

/// Parses an embedded `ChannelList` document, running each entry's metadata
/// through the DIDL-Lite extractor.
pub fn parse_channel_list(xml: &str) -> DsResult<Vec<RadioChannel>> {
    let Some(list) = parse_embedded(xml, "ChannelList")? else {
        return Ok(Vec::new());
    };

    let entries = list.shape("Entry");
    log::debug!("[DS] ChannelList has {} entries", entries.len());

    entries.into_vec().into_iter().map(channel_from_entry).collect()
}

fn channel_from_entry(entry: &XmlElement) -> DsResult<RadioChannel> {
    let id_text = entry.child_text("Id").unwrap_or_default();
    let id = id_text
        .parse()
        .map_err(|e| DsError::decode("ChannelList entry Id", e, id_text))?;

    let fields = extract_track_fields(entry.child_text("Metadata").unwrap_or_default())?;
    if fields.uri.is_none() {
        log::warn!("[DS] Radio channel {} has no playable res", id);
    }

    Ok(RadioChannel {
        id,
        uri: fields.uri.unwrap_or_default(),
        title: fields.title.unwrap_or_default(),
        artwork: fields.artwork,
    })
}

/// Parses an embedded document; blank text means "no document".
fn parse_embedded(xml: &str, root: &'static str) -> DsResult<Option<XmlElement>> {
    if xml.trim().is_empty() {
        return Ok(None);
    }
    XmlElement::parse_rooted(xml, root)
        .map(Some)
        .map_err(|e| DsError::decode(root, e, xml))
}

// ─────────────────────────────────────────────────────────────────────────────
// Status Check
// ─────────────────────────────────────────────────────────────────────────────

/// Checks the HTTP status of a fire-and-check action.
///
/// # Errors
/// `Status` naming the task and the observed code when they differ.
pub fn ensure_status(expected: u16, task: &str, status: u16) -> DsResult<()> {
    if status == expected {
        Ok(())
    } else {
        Err(DsError::Status {
            action: task.to_string(),
            status,
            fault: None,
        })
    }
}
