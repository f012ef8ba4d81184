//! Client settings: credentials, endpoint and failure mode.

use crate::error::ConfigError;
use std::fmt;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.flowripple.com";
/// API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "v1";

pub const ENV_CLIENT_ID: &str = "FLOWRIPPLE_API_CLIENT_ID";
pub const ENV_API_KEY: &str = "FLOWRIPPLE_API_KEY";
pub const ENV_BASE_URL: &str = "FLOWRIPPLE_BASE_URL";
pub const ENV_SILENT: &str = "FLOWRIPPLE_SILENT";
pub const ENV_API_VERSION: &str = "FLOWRIPPLE_API_VERSION";

/// Settings for a [`Client`](crate::Client).
///
/// Only the client id and API key are required; neither is validated here, the
/// server is the judge of both.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    client_id: i64,
    api_key: String,
    base_url: String,
    silent: bool,
    api_version: String,
}

impl ClientConfig {
    pub fn new(client_id: i64, api_key: impl Into<String>) -> Self {
        Self {
            client_id,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            silent: false,
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Override the API base URL (used as given).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// When true, failed captures return [`Captured::Suppressed`](crate::Captured::Suppressed)
    /// instead of an error.
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Read settings from `FLOWRIPPLE_*` environment variables.
    ///
    /// `FLOWRIPPLE_API_CLIENT_ID` and `FLOWRIPPLE_API_KEY` are required;
    /// `FLOWRIPPLE_BASE_URL`, `FLOWRIPPLE_SILENT` and `FLOWRIPPLE_API_VERSION`
    /// fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let raw_id = var(ENV_CLIENT_ID).ok_or(ConfigError::Missing(ENV_CLIENT_ID))?;
        let client_id = parse_client_id(&raw_id)?;
        let api_key = var(ENV_API_KEY).ok_or(ConfigError::Missing(ENV_API_KEY))?;

        let mut config = Self::new(client_id, api_key);
        if let Some(url) = var(ENV_BASE_URL) {
            config = config.with_base_url(url);
        }
        if let Some(raw) = var(ENV_SILENT) {
            config = config.with_silent(parse_flag(ENV_SILENT, &raw)?);
        }
        if let Some(version) = var(ENV_API_VERSION) {
            config = config.with_api_version(version);
        }
        Ok(config)
    }

    pub fn client_id(&self) -> i64 {
        self.client_id
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Capture endpoint: the base URL with leading slashes stripped, then
    /// `/sdk/{version}/capture`.
    pub fn capture_url(&self) -> String {
        format!(
            "{}/sdk/{}/capture",
            self.base_url.trim_start_matches('/'),
            self.api_version
        )
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("client_id", &self.client_id)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("silent", &self.silent)
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Parse a client id as given on the command line or in the environment.
pub fn parse_client_id(raw: &str) -> Result<i64, ConfigError> {
    raw.trim().parse::<i64>().map_err(|_| ConfigError::Invalid {
        name: ENV_CLIENT_ID,
        expected: "integer",
        value: raw.to_string(),
    })
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            expected: "boolean",
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_omitted() {
        let config = ClientConfig::new(1, "k");
        assert_eq!(config.base_url(), "https://api.flowripple.com");
        assert_eq!(config.api_version(), "v1");
        assert!(!config.is_silent());
        assert_eq!(
            config.capture_url(),
            "https://api.flowripple.com/sdk/v1/capture"
        );
    }

    #[test]
    fn explicit_base_url_is_used_exactly() {
        let config = ClientConfig::new(1, "k").with_base_url("http://custom.url");
        assert_eq!(config.base_url(), "http://custom.url");
        assert_eq!(config.capture_url(), "http://custom.url/sdk/v1/capture");
    }

    #[test]
    fn capture_url_strips_only_leading_slashes() {
        let config = ClientConfig::new(1, "k")
            .with_base_url("//http://x/")
            .with_api_version("v2");
        assert_eq!(config.capture_url(), "http://x//sdk/v2/capture");
    }

    #[test]
    fn unvalidated_credentials_are_accepted() {
        let config = ClientConfig::new(-1, "");
        assert_eq!(config.client_id(), -1);
        assert_eq!(config.api_key(), "");
    }

    #[test]
    fn debug_hides_api_key() {
        let rendered = format!("{:?}", ClientConfig::new(7, "super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("client_id: 7"));
    }

    #[test]
    fn from_env_reads_all_settings() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_CLIENT_ID, "42"),
            (ENV_API_KEY, "secret"),
            (ENV_BASE_URL, "http://localhost:3000"),
            (ENV_SILENT, "TRUE"),
            (ENV_API_VERSION, "v1"),
        ]))
        .unwrap();
        assert_eq!(config.client_id(), 42);
        assert_eq!(config.api_key(), "secret");
        assert_eq!(config.base_url(), "http://localhost:3000");
        assert!(config.is_silent());
    }

    #[test]
    fn from_env_falls_back_to_defaults() {
        let config =
            ClientConfig::from_lookup(lookup(&[(ENV_CLIENT_ID, "1"), (ENV_API_KEY, "k")])).unwrap();
        assert_eq!(config, ClientConfig::new(1, "k"));
    }

    #[test]
    fn from_env_requires_credentials() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_API_KEY, "k")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_CLIENT_ID)));

        let err = ClientConfig::from_lookup(lookup(&[(ENV_CLIENT_ID, "1"), (ENV_API_KEY, "  ")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_API_KEY)));
    }

    #[test]
    fn from_env_rejects_bad_values() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_CLIENT_ID, "abc"), (ENV_API_KEY, "k")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = ClientConfig::from_lookup(lookup(&[
            (ENV_CLIENT_ID, "1"),
            (ENV_API_KEY, "k"),
            (ENV_SILENT, "maybe"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: ENV_SILENT, .. }));
    }
}
