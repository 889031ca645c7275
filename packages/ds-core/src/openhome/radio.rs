//! Radio service actions: preset channels.

use super::decoders::{decode_channel_list, decode_id_array_response};
use super::invoke::ActionInvoker;
use super::services::OpenHomeService;
use super::types::RadioChannel;
use super::utils::id_list_value;
use crate::error::DsResult;

const SERVICE: OpenHomeService = OpenHomeService::Radio;

pub async fn play_radio(invoker: &ActionInvoker) -> DsResult<()> {
    invoker.request(SERVICE, "Play").check("Play Radio").await
}

/// Reads the ids of every occupied preset slot.
pub async fn radio_ids(invoker: &ActionInvoker) -> DsResult<Vec<u32>> {
    invoker
        .request(SERVICE, "IdArray")
        .decode(decode_id_array_response)
        .await
}

/// Reads title, stream and artwork of the given preset slots.
pub async fn retrieve_radio_station_details(
    invoker: &ActionInvoker,
    ids: &[u32],
) -> DsResult<Vec<RadioChannel>> {
    invoker
        .request(SERVICE, "ReadList")
        .arg("IdList", id_list_value(ids))
        .decode(decode_channel_list)
        .await
}

/// Tunes to a preset. Only the channel id and stream uri are sent.
pub async fn set_radio_channel(invoker: &ActionInvoker, channel: &RadioChannel) -> DsResult<()> {
    invoker
        .request(SERVICE, "SetId")
        .arg("Value", channel.id)
        .text_arg("Uri", &channel.uri)
        .check("Set Radio Channel")
        .await
}
