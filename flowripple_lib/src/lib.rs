//! Flowripple event capture client.
//!
//! Sends application events to the Flowripple API, signing each request with
//! an HMAC-SHA256 over the request timestamp and body.
//!
//! ```rust,no_run
//! use flowripple_lib::{Client, ClientConfig};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), flowripple_lib::CaptureError> {
//! let client = Client::new(ClientConfig::new(1, "your-api-key"));
//! client
//!     .capture("user.signup", &json!({"userId": "123", "email": "user@example.com"}))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod secret;
pub mod signing;

pub use client::{Captured, Client, HttpTransport, Transport};
pub use config::{ClientConfig, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
pub use error::{CaptureError, ConfigError, Error};
pub use secret::{resolve_api_key, ApiKeySource};
pub use signing::{sign, verify, CaptureRequest, SignedEnvelope};

/// Library version for User-Agent and diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
