//! High-level DS player client.
//!
//! [`DsClient`] implements every device trait by delegating to the
//! per-service action functions over one shared [`ActionInvoker`].

use std::sync::Arc;

use async_trait::async_trait;

use super::invoke::ActionInvoker;
use super::services::ServiceTable;
use super::soap::{HttpSoapTransport, SoapTransport};
use super::traits::{DsInfo, DsPlaylist, DsProduct, DsRadio, DsVolume};
use super::types::{RadioChannel, Source, Track};
use super::{info, playlist, product, radio, volume};
use crate::error::DsResult;

/// Control point for one DS player.
///
/// Holds no mutable state; clones share the transport and can be used from
/// several tasks at once.
#[derive(Debug, Clone)]
pub struct DsClient {
    invoker: ActionInvoker,
}

impl DsClient {
    /// Creates a client for the device at `base_url`.
    ///
    /// # Arguments
    /// * `base_url` - Device root, e.g. `http://192.168.1.20:55178`
    /// * `services` - Control URLs and service types learned from discovery
    /// * `transport` - Performs the SOAP requests
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        services: ServiceTable,
        transport: Arc<dyn SoapTransport>,
    ) -> Self {
        Self {
            invoker: ActionInvoker::new(base_url, services, transport),
        }
    }

    /// Creates a client that talks HTTP through the given transport.
    #[must_use]
    pub fn with_http(
        base_url: impl Into<String>,
        services: ServiceTable,
        transport: HttpSoapTransport,
    ) -> Self {
        Self::new(base_url, services, Arc::new(transport))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.invoker.base_url()
    }

    #[must_use]
    pub fn services(&self) -> &ServiceTable {
        self.invoker.services()
    }
}

#[async_trait]
impl DsPlaylist for DsClient {
    async fn retrieve_track_details(&self, ids: &[u32]) -> DsResult<Vec<Track>> {
        playlist::retrieve_track_details(&self.invoker, ids).await
    }

    async fn track_ids(&self) -> DsResult<Vec<u32>> {
        playlist::track_ids(&self.invoker).await
    }

    async fn queue_track(&self, metadata: &str, after_id: u32) -> DsResult<u32> {
        playlist::queue_track(&self.invoker, metadata, after_id).await
    }

    async fn delete_all(&self) -> DsResult<()> {
        playlist::delete_all(&self.invoker).await
    }

    async fn enable_shuffle(&self) -> DsResult<()> {
        playlist::enable_shuffle(&self.invoker).await
    }

    async fn disable_shuffle(&self) -> DsResult<()> {
        playlist::disable_shuffle(&self.invoker).await
    }

    async fn play_from_playlist_index(&self, index: u32) -> DsResult<()> {
        playlist::play_from_playlist_index(&self.invoker, index).await
    }

    async fn play_playlist(&self) -> DsResult<()> {
        playlist::play_playlist(&self.invoker).await
    }

    async fn pause(&self) -> DsResult<()> {
        playlist::pause(&self.invoker).await
    }

    async fn skip_track(&self) -> DsResult<()> {
        playlist::skip_track(&self.invoker).await
    }
}

#[async_trait]
impl DsProduct for DsClient {
    async fn sources(&self) -> DsResult<Vec<Source>> {
        product::sources(&self.invoker).await
    }

    async fn change_source(&self, index: u32) -> DsResult<()> {
        product::change_source(&self.invoker, index).await
    }

    async fn standby_state(&self) -> DsResult<String> {
        product::standby_state(&self.invoker).await
    }

    async fn power_on(&self) -> DsResult<()> {
        product::power_on(&self.invoker).await
    }

    async fn power_off(&self) -> DsResult<()> {
        product::power_off(&self.invoker).await
    }
}

#[async_trait]
impl DsRadio for DsClient {
    async fn play_radio(&self) -> DsResult<()> {
        radio::play_radio(&self.invoker).await
    }

    async fn radio_ids(&self) -> DsResult<Vec<u32>> {
        radio::radio_ids(&self.invoker).await
    }

    async fn retrieve_radio_station_details(&self, ids: &[u32]) -> DsResult<Vec<RadioChannel>> {
        radio::retrieve_radio_station_details(&self.invoker, ids).await
    }

    async fn set_radio_channel(&self, channel: &RadioChannel) -> DsResult<()> {
        radio::set_radio_channel(&self.invoker, channel).await
    }
}

#[async_trait]
impl DsVolume for DsClient {
    async fn volume_inc(&self) -> DsResult<()> {
        volume::volume_inc(&self.invoker).await
    }

    async fn volume_dec(&self) -> DsResult<()> {
        volume::volume_dec(&self.invoker).await
    }
}

#[async_trait]
impl DsInfo for DsClient {
    async fn current_track_details(&self) -> DsResult<Track> {
        info::current_track_details(&self.invoker).await
    }
}
