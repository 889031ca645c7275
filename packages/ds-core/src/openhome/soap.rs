//! Low-level SOAP protocol implementation for OpenHome services.
//!
//! This module builds the SOAP envelope and carries it over HTTP. It does not
//! interpret the reply: the HTTP status and raw body are handed back as a
//! [`SoapReply`] and the action invoker decides what they mean.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Url};
use thiserror::Error;

use super::services::ServiceEndpoint;
use super::xml::{Envelope, XmlError};
use crate::protocol_constants::DEFAULT_SOAP_TIMEOUT_SECS;

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur while delivering a SOAP request.
#[derive(Debug, Error)]
pub enum SoapError {
    /// HTTP request to the device failed (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Base URL and control path do not form a valid URL.
    #[error("Invalid control URL: {0}")]
    InvalidUrl(String),
}

/// Convenient Result alias for SOAP operations.
pub type SoapResult<T> = Result<T, SoapError>;

// ─────────────────────────────────────────────────────────────────────────────
// Transport Seam
// ─────────────────────────────────────────────────────────────────────────────

/// Raw outcome of one SOAP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapReply {
    /// HTTP status code returned by the device.
    pub status: u16,
    /// Response body, normally a SOAP envelope.
    pub body: String,
}

impl SoapReply {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Parses the body as a SOAP envelope.
    pub fn envelope(&self) -> Result<Envelope, XmlError> {
        Envelope::parse(&self.body)
    }
}

/// Performs the HTTP exchange for one SOAP action.
///
/// `arguments` is the already encoded argument fragment; implementations
/// insert it verbatim into the envelope body.
#[async_trait]
pub trait SoapTransport: Send + Sync {
    async fn soap_request(
        &self,
        base_url: &str,
        endpoint: &ServiceEndpoint,
        action: &str,
        arguments: &str,
    ) -> SoapResult<SoapReply>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Envelope / URL Building
// ─────────────────────────────────────────────────────────────────────────────

/// Builds the request envelope around an encoded argument fragment.
///
/// The envelope is a single line with no whitespace before the root element;
/// some device SOAP parsers reject anything else.
#[must_use]
pub fn build_envelope(service_type: &str, action: &str, arguments: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/"><s:Body><u:{action} xmlns:u="{service_type}">{arguments}</u:{action}></s:Body></s:Envelope>"#
    )
}

/// Resolves a service control URL against the device base URL.
///
/// Absolute control URLs are used as given; relative paths are appended to
/// the base with exactly one separating slash.
pub fn build_control_url(base_url: &str, control_url: &str) -> SoapResult<String> {
    let url = if control_url.starts_with("http://") || control_url.starts_with("https://") {
        control_url.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            control_url.trim_start_matches('/')
        )
    };

    Url::parse(&url).map_err(|_| SoapError::InvalidUrl(url.clone()))?;
    Ok(url)
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP Transport
// ─────────────────────────────────────────────────────────────────────────────

/// reqwest-backed [`SoapTransport`].
#[derive(Debug, Clone)]
pub struct HttpSoapTransport {
    client: Client,
    timeout: Duration,
}

impl HttpSoapTransport {
    /// Creates a transport using the given HTTP client and the default
    /// request timeout.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(DEFAULT_SOAP_TIMEOUT_SECS),
        }
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for HttpSoapTransport {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

#[async_trait]
impl SoapTransport for HttpSoapTransport {
    async fn soap_request(
        &self,
        base_url: &str,
        endpoint: &ServiceEndpoint,
        action: &str,
        arguments: &str,
    ) -> SoapResult<SoapReply> {
        let url = build_control_url(base_url, &endpoint.control_url)?;
        let body = build_envelope(&endpoint.service_type, action, arguments);

        log::info!("[SOAP] {} -> {} (body: {} bytes)", action, url, body.len());
        log::debug!("[SOAP] Request body: {}", body);

        let start = Instant::now();
        let res = self
            .client
            .post(&url)
            .header("Content-Type", "text/xml; charset=\"utf-8\"")
            .header(
                "SOAPAction",
                format!("\"{}#{}\"", endpoint.service_type, action),
            )
            .body(body)
            .timeout(self.timeout)
            .send()
            .await;

        log::info!(
            "[SOAP] {} completed in {:?}: {:?}",
            action,
            start.elapsed(),
            res.as_ref().map(|r| r.status())
        );

        let res = res?;
        let status = res.status().as_u16();
        let body = res.text().await?;

        Ok(SoapReply { status, body })
    }
}
