//! Trait abstractions for DS player operations.
//!
//! These traits enable dependency injection for testability and modularity.
//! Callers depend on the narrowest trait they need; [`DsControl`] bundles all
//! of them for code that drives a whole device.

use async_trait::async_trait;

use crate::error::DsResult;
use crate::openhome::types::{RadioChannel, Source, Track};

/// Playlist queue, shuffle and transport control.
#[async_trait]
pub trait DsPlaylist: Send + Sync {
    /// Reads the uri and metadata of the given playlist entries.
    ///
    /// # Arguments
    /// * `ids` - Playlist slot ids, as returned by [`track_ids`](Self::track_ids)
    async fn retrieve_track_details(&self, ids: &[u32]) -> DsResult<Vec<Track>>;

    /// Reads the ids of every occupied playlist slot.
    async fn track_ids(&self) -> DsResult<Vec<u32>>;

    /// Inserts a track and returns the id the device assigned to it.
    ///
    /// # Arguments
    /// * `metadata` - DIDL-Lite document; its first `res` is the playable URI
    /// * `after_id` - Slot to insert after, `0` for the head of the playlist
    async fn queue_track(&self, metadata: &str, after_id: u32) -> DsResult<u32>;

    async fn delete_all(&self) -> DsResult<()>;

    async fn enable_shuffle(&self) -> DsResult<()>;

    async fn disable_shuffle(&self) -> DsResult<()>;

    /// Starts playback at a zero-based playlist position.
    async fn play_from_playlist_index(&self, index: u32) -> DsResult<()>;

    async fn play_playlist(&self) -> DsResult<()>;

    async fn pause(&self) -> DsResult<()>;

    async fn skip_track(&self) -> DsResult<()>;
}

/// Input sources and standby.
#[async_trait]
pub trait DsProduct: Send + Sync {
    async fn sources(&self) -> DsResult<Vec<Source>>;

    /// Selects a source by its position in [`sources`](Self::sources).
    async fn change_source(&self, index: u32) -> DsResult<()>;

    /// Returns the device's standby flag unconverted.
    async fn standby_state(&self) -> DsResult<String>;

    async fn power_on(&self) -> DsResult<()>;

    async fn power_off(&self) -> DsResult<()>;
}

/// Radio presets.
#[async_trait]
pub trait DsRadio: Send + Sync {
    async fn play_radio(&self) -> DsResult<()>;

    async fn radio_ids(&self) -> DsResult<Vec<u32>>;

    async fn retrieve_radio_station_details(&self, ids: &[u32]) -> DsResult<Vec<RadioChannel>>;

    async fn set_radio_channel(&self, channel: &RadioChannel) -> DsResult<()>;
}

/// Stepped volume control.
#[async_trait]
pub trait DsVolume: Send + Sync {
    async fn volume_inc(&self) -> DsResult<()>;

    async fn volume_dec(&self) -> DsResult<()>;
}

/// Now-playing information.
#[async_trait]
pub trait DsInfo: Send + Sync {
    async fn current_track_details(&self) -> DsResult<Track>;
}

/// Every device action.
pub trait DsControl: DsPlaylist + DsProduct + DsRadio + DsVolume + DsInfo {}

impl<T> DsControl for T where T: DsPlaylist + DsProduct + DsRadio + DsVolume + DsInfo {}
