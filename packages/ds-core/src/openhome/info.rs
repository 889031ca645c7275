//! Info service actions.

use super::decoders::decode_track;
use super::invoke::ActionInvoker;
use super::services::OpenHomeService;
use super::types::Track;
use crate::error::DsResult;

/// Reads the track the device is currently playing.
pub async fn current_track_details(invoker: &ActionInvoker) -> DsResult<Track> {
    invoker
        .request(OpenHomeService::Info, "Track")
        .decode(decode_track)
        .await
}
