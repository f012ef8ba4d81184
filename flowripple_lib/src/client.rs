//! HTTP client for the Flowripple capture API.

use crate::config::ClientConfig;
use crate::error::{CaptureError, Error};
use crate::signing::{timestamp_millis, CaptureRequest, SignedEnvelope};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client as HttpClient;
use serde::Serialize;
use std::future::Future;
use tracing::debug;
use url::Url;

/// How a call to [`Client::capture`] resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Captured {
    /// The endpoint accepted the event.
    Delivered,
    /// The request failed and silent mode swallowed the error.
    Suppressed,
}

impl Captured {
    pub fn is_delivered(self) -> bool {
        self == Captured::Delivered
    }

    pub fn is_suppressed(self) -> bool {
        self == Captured::Suppressed
    }
}

/// Delivers a signed envelope to the capture endpoint.
///
/// Implementations send exactly one request per call and report any
/// non-success outcome as an [`Error`].
pub trait Transport: Send + Sync {
    fn post(
        &self,
        url: Url,
        envelope: &SignedEnvelope,
    ) -> impl Future<Output = Result<(), Error>> + Send;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    pub fn new() -> Self {
        let http = HttpClient::builder()
            .user_agent(format!("flowripple-rs/{}", crate::VERSION))
            .build()
            .unwrap_or_default();
        Self { http }
    }

    /// Use a caller-built `reqwest` client (timeouts, proxies, TLS roots).
    pub fn from_client(http: HttpClient) -> Self {
        Self { http }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    async fn post(&self, url: Url, envelope: &SignedEnvelope) -> Result<(), Error> {
        let mut req = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json");
        for (name, value) in envelope.headers() {
            req = req.header(name, value);
        }
        let res = req.body(envelope.body.clone()).send().await?;
        let status = res.status();
        debug!(%status, "capture response");
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }
        Ok(())
    }
}

/// Flowripple event capture client.
///
/// Cheap to clone; the configuration is read-only, so one client can serve
/// any number of concurrent captures.
#[derive(Clone, Debug)]
pub struct Client<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl Client<HttpTransport> {
    /// Create a client. No I/O happens until the first capture.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }

    pub fn with_http(config: ClientConfig, http: HttpClient) -> Self {
        Self::with_transport(config, HttpTransport::from_client(http))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Endpoint every capture is posted to.
    pub fn capture_url(&self) -> String {
        self.config.capture_url()
    }

    /// Sign and send one event.
    ///
    /// Resolves to [`Captured::Delivered`] on any 2xx response. On failure,
    /// returns a [`CaptureError`] unless the client is in silent mode, in which
    /// case it resolves to [`Captured::Suppressed`].
    pub async fn capture<P>(&self, event_name: &str, payload: &P) -> Result<Captured, CaptureError>
    where
        P: Serialize + ?Sized,
    {
        match self.send(event_name, payload).await {
            Ok(()) => Ok(Captured::Delivered),
            Err(err) if self.config.is_silent() => {
                debug!(event = event_name, error = %err, "capture failed; suppressed by silent mode");
                Ok(Captured::Suppressed)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Sign and send one event, reporting failures regardless of silent mode.
    pub async fn send<P>(&self, event_name: &str, payload: &P) -> Result<(), Error>
    where
        P: Serialize + ?Sized,
    {
        let envelope = {
            let request = CaptureRequest::new(event_name, payload);
            SignedEnvelope::seal(
                self.config.client_id(),
                self.config.api_key(),
                timestamp_millis(),
                &request,
            )?
        };
        let url = Url::parse(&self.config.capture_url())?;

        debug!(
            %url,
            client_id = self.config.client_id(),
            event = event_name,
            timestamp = %envelope.timestamp,
            "sending capture request"
        );
        if let Err(err) = self.transport.post(url, &envelope).await {
            debug!(event = event_name, error = %err, "capture request failed");
            return Err(err);
        }
        Ok(())
    }
}
