//! Domain types decoded from OpenHome replies.
//!
//! All values are constructed from a single reply and handed to the caller;
//! nothing here is cached or mutated afterwards.

use serde::Serialize;

/// A playlist entry or the currently playing track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Playable resource URI.
    pub uri: String,
    /// Opaque DIDL-Lite metadata document describing the track.
    pub metadata: String,
}

/// An input source exposed by the Product service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// User-visible source name (e.g. "Radio").
    pub name: String,
    /// Source type (e.g. "Playlist", "Receiver").
    #[serde(rename = "type")]
    pub source_type: String,
    /// Whether the device shows this source in its UI.
    pub visible: bool,
}

/// A radio preset slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadioChannel {
    /// Device-assigned slot id.
    pub id: u32,
    /// Stream URI from the slot's metadata.
    pub uri: String,
    /// Channel title from the slot's metadata.
    pub title: String,
    /// Album art URI, when the metadata carries one.
    pub artwork: Option<String>,
}

/// Fields pulled out of a DIDL-Lite item document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackFields {
    pub title: Option<String>,
    pub artwork: Option<String>,
    pub uri: Option<String>,
}
