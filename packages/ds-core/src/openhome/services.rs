//! OpenHome service definitions.
//!
//! [`OpenHomeService`] names the services this crate talks to. Control URLs
//! and service types differ between devices and are learned from discovery,
//! so they live in a [`ServiceTable`] that callers build and pass in.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{DsError, DsResult};
use crate::protocol_constants::{
    INFO_SERVICE_ID, PLAYLIST_SERVICE_ID, PRODUCT_SERVICE_ID, RADIO_SERVICE_ID, VOLUME_SERVICE_ID,
};

/// OpenHome services used for control.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OpenHomeService {
    /// Playlist queue, shuffle and transport control.
    Playlist,
    /// Radio presets.
    Radio,
    /// Sources and standby.
    Product,
    /// Volume steps.
    Volume,
    /// Currently playing track.
    Info,
}

impl OpenHomeService {
    /// Returns the UPnP service id used as the service table key.
    #[must_use]
    pub fn service_id(&self) -> &'static str {
        match self {
            Self::Playlist => PLAYLIST_SERVICE_ID,
            Self::Radio => RADIO_SERVICE_ID,
            Self::Product => PRODUCT_SERVICE_ID,
            Self::Volume => VOLUME_SERVICE_ID,
            Self::Info => INFO_SERVICE_ID,
        }
    }

    /// Returns a human-readable name for this service.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Playlist => "Playlist",
            Self::Radio => "Radio",
            Self::Product => "Product",
            Self::Volume => "Volume",
            Self::Info => "Info",
        }
    }
}

/// Where and how to reach one service on a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    /// Control path (or absolute URL) for SOAP requests.
    pub control_url: String,
    /// Service type URN sent in the SOAPAction header.
    pub service_type: String,
}

impl ServiceEndpoint {
    #[must_use]
    pub fn new(control_url: impl Into<String>, service_type: impl Into<String>) -> Self {
        Self {
            control_url: control_url.into(),
            service_type: service_type.into(),
        }
    }
}

/// Lookup from service id to endpoint, populated from discovery or config.
///
/// Keys are full service ids (`urn:av-openhome-org:serviceId:Playlist`), which
/// is also the shape of the YAML `services:` map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceTable {
    endpoints: HashMap<String, ServiceEndpoint>,
}

impl ServiceTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an endpoint for a known service, replacing any previous entry.
    #[must_use]
    pub fn with(mut self, service: OpenHomeService, endpoint: ServiceEndpoint) -> Self {
        self.insert(service.service_id(), endpoint);
        self
    }

    /// Adds an endpoint under a raw service id.
    pub fn insert(&mut self, service_id: impl Into<String>, endpoint: ServiceEndpoint) {
        self.endpoints.insert(service_id.into(), endpoint);
    }

    /// Returns the endpoint for a service, if the device exposes it.
    #[must_use]
    pub fn get(&self, service: OpenHomeService) -> Option<&ServiceEndpoint> {
        self.endpoints.get(service.service_id())
    }

    /// Returns the endpoint for a service or a `NotFound` error naming it.
    pub fn lookup(&self, service: OpenHomeService) -> DsResult<&ServiceEndpoint> {
        self.get(service)
            .ok_or_else(|| DsError::not_found(format!("No {} Service", service.name())))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
