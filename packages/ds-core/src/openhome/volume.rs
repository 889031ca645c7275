//! Volume service actions.
//!
//! The DS Volume service is stepped: each call moves the level by one unit
//! and the resulting level is not returned.

use super::invoke::ActionInvoker;
use super::services::OpenHomeService;
use crate::error::DsResult;

const SERVICE: OpenHomeService = OpenHomeService::Volume;

pub async fn volume_inc(invoker: &ActionInvoker) -> DsResult<()> {
    invoker
        .request(SERVICE, "VolumeInc")
        .check("Volume Increase")
        .await
}

pub async fn volume_dec(invoker: &ActionInvoker) -> DsResult<()> {
    invoker
        .request(SERVICE, "VolumeDec")
        .check("Volume Decrease")
        .await
}
