//! Fixed protocol constants that should NOT be changed.
//!
//! These values are defined by the OpenHome service descriptions and the
//! devices that implement them; changing them would break interoperability.

// ─────────────────────────────────────────────────────────────────────────────
// OpenHome Service Identifiers
// ─────────────────────────────────────────────────────────────────────────────

/// Service id of the Playlist service (queue, shuffle, transport).
pub const PLAYLIST_SERVICE_ID: &str = "urn:av-openhome-org:serviceId:Playlist";

/// Service id of the Radio service (preset channels).
pub const RADIO_SERVICE_ID: &str = "urn:av-openhome-org:serviceId:Radio";

/// Service id of the Product service (sources, standby).
pub const PRODUCT_SERVICE_ID: &str = "urn:av-openhome-org:serviceId:Product";

/// Service id of the Volume service.
pub const VOLUME_SERVICE_ID: &str = "urn:av-openhome-org:serviceId:Volume";

/// Service id of the Info service (current track).
pub const INFO_SERVICE_ID: &str = "urn:av-openhome-org:serviceId:Info";

// ─────────────────────────────────────────────────────────────────────────────
// HTTP/SOAP
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP status a fire-and-check action must return to count as a success.
pub const EXPECTED_STATUS: u16 = 200;

/// Default timeout for SOAP HTTP requests (seconds).
///
/// 10 seconds is reasonable for LAN operations.
pub const DEFAULT_SOAP_TIMEOUT_SECS: u64 = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Playlist / Radio IDs
// ─────────────────────────────────────────────────────────────────────────────

/// Reserved slot id meaning "empty slot". Never reported in decoded id lists.
pub const EMPTY_SLOT_ID: u32 = 0;
