//! Request signing.
//!
//! Every capture is authenticated with `hex(HMAC-SHA256(api_key, timestamp + body))`
//! where `timestamp` is the decimal millisecond clock reading sent alongside it
//! and `body` is the exact JSON text posted. The server recomputes the same
//! digest, so the signed bytes and the sent bytes must never diverge: the body
//! is serialized once and reused for both.

use crate::error::Error;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const HEADER_CLIENT_ID: &str = "X-Flowripple-Api-Client-Id";
pub const HEADER_SIGNATURE: &str = "X-Flowripple-Signature";
pub const HEADER_TIMESTAMP: &str = "X-Flowripple-Timestamp";

/// Body of a capture request. Field order is part of the signature.
#[derive(Debug, Serialize)]
pub struct CaptureRequest<'a, P: ?Sized> {
    pub event: &'a str,
    pub payload: &'a P,
}

impl<'a, P: Serialize + ?Sized> CaptureRequest<'a, P> {
    pub fn new(event: &'a str, payload: &'a P) -> Self {
        Self { event, payload }
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A serialized body with the values that travel in its headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    pub client_id: i64,
    pub timestamp: String,
    pub signature: String,
    pub body: String,
}

impl SignedEnvelope {
    /// Serialize `request` and sign it for the given timestamp.
    pub fn seal<P: Serialize + ?Sized>(
        client_id: i64,
        api_key: &str,
        timestamp: String,
        request: &CaptureRequest<'_, P>,
    ) -> Result<Self, Error> {
        let body = request.to_json()?;
        let signature = sign(api_key, &timestamp, &body);
        Ok(Self {
            client_id,
            timestamp,
            signature,
            body,
        })
    }

    /// Header name/value pairs, in the order they are sent.
    pub fn headers(&self) -> [(&'static str, String); 3] {
        [
            (HEADER_CLIENT_ID, self.client_id.to_string()),
            (HEADER_SIGNATURE, self.signature.clone()),
            (HEADER_TIMESTAMP, self.timestamp.clone()),
        ]
    }
}

fn mac_for(api_key: &str, timestamp: &str, body: &str) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(api_key.as_bytes()).expect("HMAC key size is always valid");
    mac.update(timestamp.as_bytes());
    mac.update(body.as_bytes());
    mac
}

/// Lowercase hex HMAC-SHA256 of `timestamp` followed by `body`.
pub fn sign(api_key: &str, timestamp: &str, body: &str) -> String {
    hex::encode(mac_for(api_key, timestamp, body).finalize().into_bytes())
}

/// Check a hex signature in constant time.
pub fn verify(api_key: &str, timestamp: &str, body: &str, signature: &str) -> bool {
    let Ok(expected) = hex::decode(signature) else {
        return false;
    };
    mac_for(api_key, timestamp, body)
        .verify_slice(&expected)
        .is_ok()
}

/// Current wall-clock time in milliseconds since the Unix epoch, base 10.
pub fn timestamp_millis() -> String {
    Utc::now().timestamp_millis().to_string()
}
