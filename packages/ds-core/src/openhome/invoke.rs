//! Action invoker.
//!
//! Resolves a service in the [`ServiceTable`], assembles the argument
//! fragment, hands the request to the [`SoapTransport`] and interprets the
//! reply in one of two ways:
//!
//! - **fire-and-check** ([`ActionRequest::check`]): success is HTTP 200, the
//!   body is ignored
//! - **fire-and-decode** ([`ActionRequest::decode`]): the body is parsed and
//!   passed to a reply decoder
//!
//! Transport errors are returned unchanged; nothing is retried.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;

use super::decoders::ensure_status;
use super::services::{OpenHomeService, ServiceTable};
use super::soap::{SoapReply, SoapTransport};
use super::utils::encode;
use super::xml::Envelope;
use crate::error::{DsError, DsResult};
use crate::protocol_constants::EXPECTED_STATUS;

/// Dispatches OpenHome actions for one device.
#[derive(Clone)]
pub struct ActionInvoker {
    base_url: String,
    services: ServiceTable,
    transport: Arc<dyn SoapTransport>,
}

impl std::fmt::Debug for ActionInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionInvoker")
            .field("base_url", &self.base_url)
            .field("services", &self.services.len())
            .finish_non_exhaustive()
    }
}

impl ActionInvoker {
    /// Creates an invoker for the device at `base_url`.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        services: ServiceTable,
        transport: Arc<dyn SoapTransport>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            services,
            transport,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn services(&self) -> &ServiceTable {
        &self.services
    }

    /// Starts building a request for `action` on `service`.
    #[must_use]
    pub fn request<'a>(&'a self, service: OpenHomeService, action: &'a str) -> ActionRequest<'a> {
        ActionRequest {
            invoker: self,
            service,
            action,
            arguments: String::new(),
        }
    }
}

/// One pending action with its argument fragment.
///
/// # Example
/// ```ignore
/// invoker
///     .request(OpenHomeService::Radio, "SetId")
///     .arg("Value", channel.id)
///     .text_arg("Uri", &channel.uri)
///     .check("Set Radio Channel")
///     .await?;
/// ```
#[must_use]
pub struct ActionRequest<'a> {
    invoker: &'a ActionInvoker,
    service: OpenHomeService,
    action: &'a str,
    arguments: String,
}

impl<'a> ActionRequest<'a> {
    /// Appends `<key>value</key>` with the value written as is.
    ///
    /// For numbers and values already safe to embed; use
    /// [`text_arg`](Self::text_arg) for free text.
    pub fn arg(mut self, key: &str, value: impl Display) -> Self {
        self.arguments.push_str(&format!("<{key}>{value}</{key}>"));
        self
    }

    /// Appends `<key>text</key>` with the text entity-encoded.
    pub fn text_arg(self, key: &str, text: &str) -> Self {
        let encoded = encode(text);
        self.arg(key, encoded)
    }

    /// Sends the request and succeeds only on HTTP 200.
    ///
    /// # Errors
    /// `NotFound` if the service is not in the table, `Transport` if the
    /// request could not be delivered, `Status` naming `task` otherwise.
    pub async fn check(self, task: &str) -> DsResult<()> {
        let reply = self.send().await?;
        ensure_status(EXPECTED_STATUS, task, reply.status).inspect_err(|e| {
            log::warn!("[DS] {}", e);
        })
    }

    /// Sends the request and decodes the reply envelope.
    ///
    /// A SOAP fault in the reply becomes a `Status` error carrying the fault
    /// description. A body that is not an envelope is a `Status` error when
    /// the HTTP status was not 200 and a `Decode` error otherwise.
    pub async fn decode<T>(self, decoder: fn(&Envelope) -> DsResult<T>) -> DsResult<T> {
        let action = self.action;
        let reply = self.send().await?;

        let envelope = match reply.envelope() {
            Ok(envelope) => envelope,
            Err(e) if reply.status != EXPECTED_STATUS => {
                log::warn!(
                    "[DS] {} rejected with status {} and unreadable body: {}",
                    action,
                    reply.status,
                    e
                );
                return Err(DsError::Status {
                    action: action.to_string(),
                    status: reply.status,
                    fault: None,
                });
            }
            Err(e) => return Err(DsError::decode("SOAP envelope", e, reply.body)),
        };

        if let Some(fault) = envelope.fault() {
            log::warn!("[DS] {} returned SOAP fault: {}", action, fault);
            return Err(DsError::Status {
                action: action.to_string(),
                status: reply.status,
                fault: Some(fault),
            });
        }

        decoder(&envelope)
    }

    async fn send(self) -> DsResult<SoapReply> {
        let endpoint = self.invoker.services.lookup(self.service)?;

        log::info!("[DS] {}#{} dispatched", self.service.name(), self.action);
        log::debug!("[DS] {} arguments: {}", self.action, self.arguments);

        let start = Instant::now();
        let reply = self
            .invoker
            .transport
            .soap_request(&self.invoker.base_url, endpoint, self.action, &self.arguments)
            .await?;

        log::info!(
            "[DS] {}#{} completed in {:?} with status {}",
            self.service.name(),
            self.action,
            start.elapsed(),
            reply.status
        );

        Ok(reply)
    }

    /// Returns the request parts without sending (for testing).
    #[cfg(test)]
    pub fn into_parts(self) -> (OpenHomeService, &'a str, String) {
        (self.service, self.action, self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openhome::decoders::{decode_new_id, decode_standby};
    use crate::openhome::services::ServiceEndpoint;
    use crate::openhome::soap::SoapError;
    use crate::openhome::test_fixtures::*;

    fn invoker(mock: &Arc<MockTransport>) -> ActionInvoker {
        ActionInvoker::new(TEST_BASE_URL, full_service_table(), mock.clone())
    }

    #[test]
    fn builder_captures_args_in_order() {
        let mock = Arc::new(MockTransport::new());
        let invoker = invoker(&mock);
        let (service, action, arguments) = invoker
            .request(OpenHomeService::Radio, "SetId")
            .arg("Value", 7)
            .text_arg("Uri", "http://s/?a=1&b=2")
            .into_parts();

        assert_eq!(service, OpenHomeService::Radio);
        assert_eq!(action, "SetId");
        assert_eq!(arguments, "<Value>7</Value><Uri>http://s/?a=1&amp;b=2</Uri>");
    }

    #[test]
    fn request_without_args_has_empty_fragment() {
        let mock = Arc::new(MockTransport::new());
        let invoker = invoker(&mock);
        let (_, _, arguments) = invoker.request(OpenHomeService::Playlist, "Play").into_parts();
        assert!(arguments.is_empty());
    }

    #[tokio::test]
    async fn check_sends_to_resolved_endpoint() {
        let mock = Arc::new(MockTransport::new());
        invoker(&mock)
            .request(OpenHomeService::Playlist, "SeekIndex")
            .arg("Value", 4)
            .check("Play Playlist From Index 4")
            .await
            .expect("200 is success");

        let call = mock.single_call();
        assert_eq!(call.base_url, TEST_BASE_URL);
        assert_eq!(call.control_url, "/Ds/Playlist/control");
        assert_eq!(call.service_type, "urn:av-openhome-org:service:Playlist:1");
        assert_eq!(call.action, "SeekIndex");
        assert_eq!(call.arguments, "<Value>4</Value>");
    }

    #[tokio::test]
    async fn check_reports_unexpected_status() {
        let mock = Arc::new(MockTransport::new().with_reply(500, ""));
        let err = invoker(&mock)
            .request(OpenHomeService::Product, "SetStandby")
            .arg("Value", 0)
            .check("Power On")
            .await
            .unwrap_err();

        assert!(matches!(err, DsError::Status { status: 500, .. }));
        assert_eq!(err.to_string(), "Power On: Failed with status 500");
    }

    #[tokio::test]
    async fn missing_service_fails_without_network_call() {
        let mock = Arc::new(MockTransport::new());
        let invoker = ActionInvoker::new(
            TEST_BASE_URL,
            ServiceTable::new().with(
                OpenHomeService::Playlist,
                ServiceEndpoint::new("/Ds/Playlist/control", "urn:av-openhome-org:service:Playlist:1"),
            ),
            mock.clone(),
        );

        let err = invoker
            .request(OpenHomeService::Volume, "VolumeInc")
            .check("Volume Increase")
            .await
            .unwrap_err();

        assert!(matches!(err, DsError::NotFound(ref msg) if msg == "No Volume Service"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn transport_errors_pass_through_unretried() {
        let mock = Arc::new(
            MockTransport::new().with_error(SoapError::InvalidUrl("http://[bad".into())),
        );
        let err = invoker(&mock)
            .request(OpenHomeService::Playlist, "Pause")
            .check("Pause Track")
            .await
            .unwrap_err();

        assert!(matches!(err, DsError::Transport(SoapError::InvalidUrl(_))));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn decode_applies_decoder_to_envelope() {
        let mock = Arc::new(
            MockTransport::new()
                .with_response("<u:StandbyResponse><Value>true</Value></u:StandbyResponse>"),
        );
        let value = invoker(&mock)
            .request(OpenHomeService::Product, "Standby")
            .decode(decode_standby)
            .await
            .expect("decoded");
        assert_eq!(value, "true");
    }

    #[tokio::test]
    async fn decode_turns_fault_into_status_error() {
        let mock = Arc::new(MockTransport::new().with_reply(500, FAULT_ENVELOPE));
        let err = invoker(&mock)
            .request(OpenHomeService::Playlist, "Insert")
            .decode(decode_new_id)
            .await
            .unwrap_err();

        match err {
            DsError::Status { action, status, fault } => {
                assert_eq!(action, "Insert");
                assert_eq!(status, 500);
                assert_eq!(fault.as_deref(), Some("UPnPError 800: Playlist full"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn decode_of_non_soap_error_page_is_status_error() {
        let mock = Arc::new(MockTransport::new().with_reply(503, "Service Unavailable"));
        let err = invoker(&mock)
            .request(OpenHomeService::Product, "Standby")
            .decode(decode_standby)
            .await
            .unwrap_err();
        assert!(matches!(err, DsError::Status { status: 503, fault: None, .. }));
    }

    #[tokio::test]
    async fn decode_of_garbled_success_body_is_decode_error() {
        let mock = Arc::new(MockTransport::new().with_reply(200, "<s:Envelope><s:Body>"));
        let err = invoker(&mock)
            .request(OpenHomeService::Product, "Standby")
            .decode(decode_standby)
            .await
            .unwrap_err();
        assert!(matches!(err, DsError::Decode { ref what, .. } if what == "SOAP envelope"));
    }
}
