//! OpenHome DS player control.
//!
//! This module issues UPnP/SOAP actions against the OpenHome services of a
//! DS player and decodes the replies into domain types.
//!
//! # Module Structure
//!
//! - `types` - Domain types (tracks, sources, radio channels)
//! - `services` - OpenHome service ids and the explicit service table
//! - `soap` - SOAP envelope building and the HTTP transport
//! - `xml` - Generic element tree and single/multi shape normalization
//! - `utils` - Entity encoding and argument formatting
//! - `id_array` - Base64 big-endian ID array decoding
//! - `didl` - DIDL-Lite metadata field extraction
//! - `decoders` - One decoder per action reply shape
//! - `invoke` - Action invoker (fire-and-check / fire-and-decode)
//! - `playlist`, `product`, `radio`, `volume`, `info` - Per-service actions
//! - `traits` - Trait abstractions for the device API
//! - `client` - `DsClient` concrete trait implementation

pub mod client;
pub mod decoders;
pub mod didl;
pub mod id_array;
pub(crate) mod info;
pub mod invoke;
pub(crate) mod playlist;
pub(crate) mod product;
pub(crate) mod radio;
pub mod services;
pub mod soap;
pub mod traits;
pub mod types;
pub mod utils;
pub(crate) mod volume;
pub mod xml;

#[cfg(test)]
pub(crate) mod test_fixtures;

// Re-export domain types
pub use services::{OpenHomeService, ServiceEndpoint, ServiceTable};
pub use types::{RadioChannel, Source, Track, TrackFields};

// Re-export transport
pub use soap::{HttpSoapTransport, SoapError, SoapReply, SoapTransport};

// Re-export invoker and trait abstractions
pub use invoke::ActionInvoker;
pub use traits::{DsControl, DsInfo, DsPlaylist, DsProduct, DsRadio, DsVolume};

// Re-export concrete implementation
pub use client::DsClient;
