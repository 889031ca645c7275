//! Playlist service actions: queue management, shuffle and transport.

use super::decoders::{decode_id_array_response, decode_new_id, decode_track_list};
use super::didl::playable_uri;
use super::invoke::ActionInvoker;
use super::services::OpenHomeService;
use super::types::Track;
use super::utils::id_list_value;
use crate::error::{DsError, DsResult};

const SERVICE: OpenHomeService = OpenHomeService::Playlist;

// ─────────────────────────────────────────────────────────────────────────────
// Queue
// ─────────────────────────────────────────────────────────────────────────────

/// Reads the uri and metadata of the given playlist entries.
pub async fn retrieve_track_details(invoker: &ActionInvoker, ids: &[u32]) -> DsResult<Vec<Track>> {
    invoker
        .request(SERVICE, "ReadList")
        .arg("IdList", id_list_value(ids))
        .decode(decode_track_list)
        .await
}

/// Reads the ids of every occupied playlist slot, in playlist order.
pub async fn track_ids(invoker: &ActionInvoker) -> DsResult<Vec<u32>> {
    invoker
        .request(SERVICE, "IdArray")
        .decode(decode_id_array_response)
        .await
}

/// Inserts a track after `after_id` (`0` for the head) and returns its new id.
///
/// The playable URI is taken from the first `res` of the DIDL-Lite metadata.
///
/// # Errors
/// `Validation("Error adding …")` without any request when the metadata
/// cannot be parsed or carries no resource URI.
pub async fn queue_track(invoker: &ActionInvoker, metadata: &str, after_id: u32) -> DsResult<u32> {
    let Some(uri) = playable_uri(metadata) else {
        log::warn!("[DS] Refusing to queue track without a playable resource");
        return Err(DsError::Validation(format!("Error adding {metadata}")));
    };

    invoker
        .request(SERVICE, "Insert")
        .arg("AfterId", after_id)
        .text_arg("Uri", &uri)
        .text_arg("Metadata", metadata)
        .decode(decode_new_id)
        .await
}

pub async fn delete_all(invoker: &ActionInvoker) -> DsResult<()> {
    invoker.request(SERVICE, "DeleteAll").check("Delete").await
}

// ─────────────────────────────────────────────────────────────────────────────
// Shuffle
// ─────────────────────────────────────────────────────────────────────────────

pub async fn enable_shuffle(invoker: &ActionInvoker) -> DsResult<()> {
    invoker
        .request(SERVICE, "SetShuffle")
        .arg("Value", 1)
        .check("Enable Shuffle")
        .await
}

pub async fn disable_shuffle(invoker: &ActionInvoker) -> DsResult<()> {
    invoker
        .request(SERVICE, "SetShuffle")
        .arg("Value", 0)
        .check("Disable Shuffle")
        .await
}

// ─────────────────────────────────────────────────────────────────────────────
// Transport
// ─────────────────────────────────────────────────────────────────────────────

/// Starts playback at the given playlist position.
pub async fn play_from_playlist_index(invoker: &ActionInvoker, index: u32) -> DsResult<()> {
    invoker
        .request(SERVICE, "SeekIndex")
        .arg("Value", index)
        .check(&format!("Play Playlist From Index {index}"))
        .await
}

pub async fn play_playlist(invoker: &ActionInvoker) -> DsResult<()> {
    invoker.request(SERVICE, "Play").check("Play Playlist").await
}

pub async fn pause(invoker: &ActionInvoker) -> DsResult<()> {
    invoker.request(SERVICE, "Pause").check("Pause Track").await
}

pub async fn skip_track(invoker: &ActionInvoker) -> DsResult<()> {
    invoker.request(SERVICE, "Next").check("Skip Track").await
}
