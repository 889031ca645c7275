//! Product service actions: input sources and standby.

use super::decoders::{decode_source_list, decode_standby};
use super::invoke::ActionInvoker;
use super::services::OpenHomeService;
use super::types::Source;
use crate::error::DsResult;

const SERVICE: OpenHomeService = OpenHomeService::Product;

/// Lists the device's input sources in device order.
pub async fn sources(invoker: &ActionInvoker) -> DsResult<Vec<Source>> {
    invoker
        .request(SERVICE, "SourceXml")
        .decode(decode_source_list)
        .await
}

/// Selects the source at `index` in the source list.
pub async fn change_source(invoker: &ActionInvoker, index: u32) -> DsResult<()> {
    invoker
        .request(SERVICE, "SetSourceIndex")
        .arg("Value", index)
        .check("Change Source")
        .await
}

/// Reads the standby flag as the device reports it (`"true"`/`"false"`).
pub async fn standby_state(invoker: &ActionInvoker) -> DsResult<String> {
    invoker
        .request(SERVICE, "Standby")
        .decode(decode_standby)
        .await
}

pub async fn power_on(invoker: &ActionInvoker) -> DsResult<()> {
    set_standby(invoker, false, "Power On").await
}

pub async fn power_off(invoker: &ActionInvoker) -> DsResult<()> {
    set_standby(invoker, true, "Power Off").await
}

async fn set_standby(invoker: &ActionInvoker, standby: bool, task: &str) -> DsResult<()> {
    invoker
        .request(SERVICE, "SetStandby")
        .arg("Value", u8::from(standby))
        .check(task)
        .await
}
