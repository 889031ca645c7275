//! DS Core - control-point library for OpenHome DS players.
//!
//! This crate drives the SOAP services exposed by OpenHome "DS" network
//! players (Playlist, Radio, Product, Volume, Info). It encodes action
//! arguments, hands the envelope to a transport, and decodes each service's
//! reply into typed domain values.
//!
//! # Architecture
//!
//! - [`openhome`]: Service table, SOAP transport, reply decoders and the
//!   per-service device API
//! - [`error`]: Centralized error types
//! - [`protocol_constants`]: Fixed protocol values (service ids, status codes)
//!
//! # Abstraction Traits
//!
//! - [`SoapTransport`](openhome::SoapTransport): Performs the HTTP/SOAP call.
//!   [`HttpSoapTransport`](openhome::HttpSoapTransport) is the reqwest-backed
//!   default; tests substitute a recording mock.
//! - [`DsControl`](openhome::DsControl): Every device action, implemented by
//!   [`DsClient`](openhome::DsClient).

#![warn(clippy::all)]

pub mod error;
pub mod openhome;
pub mod protocol_constants;

// Re-export commonly used types at the crate root
pub use error::{DsError, DsResult, ErrorCode, SoapResult};
pub use openhome::{
    ActionInvoker, DsClient, DsControl, DsInfo, DsPlaylist, DsProduct, DsRadio, DsVolume,
    HttpSoapTransport, OpenHomeService, RadioChannel, ServiceEndpoint, ServiceTable, SoapError,
    SoapReply, SoapTransport, Source, Track, TrackFields,
};
