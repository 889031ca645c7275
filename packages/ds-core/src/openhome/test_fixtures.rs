//! Shared test fixtures for OpenHome reply payloads.
//!
//! Reply builders produce envelopes the way devices do: embedded documents
//! are escaped as text, and metadata inside an embedded list is escaped a
//! second time. `MockTransport` stands in for the network.

use std::collections::VecDeque;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use parking_lot::Mutex;

use super::services::{OpenHomeService, ServiceEndpoint, ServiceTable};
use super::soap::{SoapReply, SoapResult, SoapTransport};
use super::utils::encode;

pub const TEST_BASE_URL: &str = "http://192.168.1.20:55178";

// ─────────────────────────────────────────────────────────────────────────────
// Envelopes
// ─────────────────────────────────────────────────────────────────────────────

/// Wraps an action response element in a SOAP envelope.
pub fn envelope(inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/"><s:Body>{inner}</s:Body></s:Envelope>"#
    )
}

/// SOAP fault as sent by a Playlist service that has run out of slots.
pub const FAULT_ENVELOPE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
  <s:Body>
    <s:Fault>
      <faultcode>s:Client</faultcode>
      <faultstring>UPnPError</faultstring>
      <detail>
        <UPnPError xmlns="urn:schemas-upnp-org:control-1-0">
          <errorCode>800</errorCode>
          <errorDescription>Playlist full</errorDescription>
        </UPnPError>
      </detail>
    </s:Fault>
  </s:Body>
</s:Envelope>"#;

// ─────────────────────────────────────────────────────────────────────────────
// DIDL-Lite Metadata
// ─────────────────────────────────────────────────────────────────────────────

/// Wraps item content in a DIDL-Lite document with the usual namespaces.
pub fn didl_item(inner: &str) -> String {
    format!(
        r#"<DIDL-Lite xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/" xmlns:dlna="urn:schemas-dlna-org:metadata-1-0/"><item id="" parentID="" restricted="True">{inner}<upnp:class>object.item.audioItem</upnp:class></item></DIDL-Lite>"#
    )
}

/// Radio channel metadata with plain text fields.
pub const CHANNEL_DIDL_PLAIN: &str = r#"<DIDL-Lite xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/">
<item id="" parentID="" restricted="True">
<dc:title>Jazz FM</dc:title>
<upnp:albumArtURI>http://img.example/jazz.png</upnp:albumArtURI>
<res>http://stream.example/jazz</res>
<upnp:class>object.item.audioItem</upnp:class>
</item>
</DIDL-Lite>"#;

/// The same channel with attributes on every field.
pub const CHANNEL_DIDL_ATTRIBUTED: &str = r#"<DIDL-Lite xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/" xmlns:dlna="urn:schemas-dlna-org:metadata-1-0/">
<item id="" parentID="" restricted="True">
<dc:title xml:lang="en">Jazz FM</dc:title>
<upnp:albumArtURI dlna:profileID="PNG_LRG">http://img.example/jazz.png</upnp:albumArtURI>
<res protocolInfo="http-get:*:audio/x-mpegurl:*" bitrate="16000">http://stream.example/jazz</res>
<upnp:class>object.item.audioItem</upnp:class>
</item>
</DIDL-Lite>"#;

/// Library track offering two resources; the FLAC one comes first.
pub const TRACK_DIDL_MULTI_RES: &str = r#"<DIDL-Lite xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/">
<item id="64$1$2" parentID="64$1" restricted="1">
<dc:title>So What</dc:title>
<upnp:artist>Miles Davis</upnp:artist>
<res protocolInfo="http-get:*:audio/flac:*" duration="0:09:22.000">http://media.example/track.flac</res>
<res protocolInfo="http-get:*:audio/mpeg:*">http://media.example/track.mp3</res>
<upnp:class>object.item.audioItem.musicTrack</upnp:class>
</item>
</DIDL-Lite>"#;

// ─────────────────────────────────────────────────────────────────────────────
// Reply Builders
// ─────────────────────────────────────────────────────────────────────────────

/// Info `TrackResponse` body.
pub fn track_response(uri: &str, metadata: &str) -> String {
    format!(
        r#"<u:TrackResponse xmlns:u="urn:av-openhome-org:service:Info:1"><Uri>{}</Uri><Metadata>{}</Metadata></u:TrackResponse>"#,
        encode(uri),
        encode(metadata)
    )
}

/// Product `SourceXmlResponse` body for `(name, type, visible)` entries.
pub fn source_xml_response(sources: &[(&str, &str, &str)]) -> String {
    let entries: String = sources
        .iter()
        .map(|(name, kind, visible)| {
            format!(
                "<Source><Name>{name}</Name><Type>{kind}</Type><Visible>{visible}</Visible></Source>"
            )
        })
        .collect();
    format!(
        r#"<u:SourceXmlResponse xmlns:u="urn:av-openhome-org:service:Product:1"><Value>{}</Value></u:SourceXmlResponse>"#,
        encode(&format!("<SourceList>{entries}</SourceList>"))
    )
}

/// Playlist `ReadListResponse` body for `(uri, metadata)` entries.
pub fn track_list_response(tracks: &[(&str, &str)]) -> String {
    let entries: String = tracks
        .iter()
        .enumerate()
        .map(|(i, (uri, metadata))| {
            format!(
                "<Entry><Id>{}</Id><Uri>{}</Uri><Metadata>{}</Metadata></Entry>",
                i + 1,
                encode(uri),
                encode(metadata)
            )
        })
        .collect();
    format!(
        r#"<u:ReadListResponse xmlns:u="urn:av-openhome-org:service:Playlist:1"><TrackList>{}</TrackList></u:ReadListResponse>"#,
        encode(&format!("<TrackList>{entries}</TrackList>"))
    )
}

/// Radio `ReadListResponse` body for `(id, metadata)` entries.
pub fn channel_list_response(channels: &[(u32, &str)]) -> String {
    let entries: String = channels
        .iter()
        .map(|(id, metadata)| {
            format!(
                "<Entry><Id>{id}</Id><Metadata>{}</Metadata></Entry>",
                encode(metadata)
            )
        })
        .collect();
    format!(
        r#"<u:ReadListResponse xmlns:u="urn:av-openhome-org:service:Radio:1"><ChannelList>{}</ChannelList></u:ReadListResponse>"#,
        encode(&format!("<ChannelList>{entries}</ChannelList>"))
    )
}

/// Encodes slot ids the way `IdArray` replies carry them.
pub fn encode_id_words(ids: &[u32]) -> String {
    let bytes: Vec<u8> = ids.iter().flat_map(|id| id.to_be_bytes()).collect();
    STANDARD.encode(bytes)
}

/// A service table exposing all five services at their usual DS paths.
pub fn full_service_table() -> ServiceTable {
    [
        OpenHomeService::Playlist,
        OpenHomeService::Radio,
        OpenHomeService::Product,
        OpenHomeService::Volume,
        OpenHomeService::Info,
    ]
    .into_iter()
    .fold(ServiceTable::new(), |table, service| {
        table.with(
            service,
            ServiceEndpoint::new(
                format!("/Ds/{}/control", service.name()),
                format!("urn:av-openhome-org:service:{}:1", service.name()),
            ),
        )
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Mock Transport
// ─────────────────────────────────────────────────────────────────────────────

/// One request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub base_url: String,
    pub control_url: String,
    pub service_type: String,
    pub action: String,
    pub arguments: String,
}

/// Recording transport that answers from a queue of canned replies.
///
/// With the queue empty it answers `200` with an empty SOAP body.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<SoapResult<SoapReply>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply with the given status and body.
    pub fn with_reply(self, status: u16, body: impl Into<String>) -> Self {
        self.replies
            .lock()
            .push_back(Ok(SoapReply::new(status, body)));
        self
    }

    /// Queues a `200` reply wrapping the given response element.
    pub fn with_response(self, inner: &str) -> Self {
        self.with_reply(200, envelope(inner))
    }

    /// Queues a transport failure.
    pub fn with_error(self, error: super::soap::SoapError) -> Self {
        self.replies.lock().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// The only recorded call; panics unless exactly one was made.
    pub fn single_call(&self) -> RecordedCall {
        let calls = self.calls.lock();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {calls:?}");
        calls[0].clone()
    }
}

#[async_trait]
impl SoapTransport for MockTransport {
    async fn soap_request(
        &self,
        base_url: &str,
        endpoint: &ServiceEndpoint,
        action: &str,
        arguments: &str,
    ) -> SoapResult<SoapReply> {
        self.calls.lock().push(RecordedCall {
            base_url: base_url.to_string(),
            control_url: endpoint.control_url.clone(),
            service_type: endpoint.service_type.clone(),
            action: action.to_string(),
            arguments: arguments.to_string(),
        });

        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(SoapReply::new(200, envelope(""))))
    }
}
