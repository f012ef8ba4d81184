//! API key resolution for command-line use.
//!
//! Keys come from the environment or, so they never have to sit in a shell
//! profile, from a password manager CLI:
//! - `FLOWRIPPLE_API_KEY`: the key itself
//! - 1Password: `FLOWRIPPLE_OP_ENTRY_PATH` (`op://Vault/Item`), field from
//!   `FLOWRIPPLE_OP_FIELD` (default `API_KEY`)
//! - Bitwarden: `FLOWRIPPLE_BW_ITEM_ID`, optional `FLOWRIPPLE_BW_SESSION`

use crate::config::ENV_API_KEY;
use crate::error::ConfigError;
use std::process::{Command, Stdio};

/// Where the API key was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Env,
    OnePassword,
    Bitwarden,
}

/// Resolve the API key, trying the environment first and then each password manager.
pub fn resolve_api_key() -> Result<(String, ApiKeySource), ConfigError> {
    resolve_with(|name| std::env::var(name).ok(), run_secret_cmd)
}

fn resolve_with<E, R>(env: E, run: R) -> Result<(String, ApiKeySource), ConfigError>
where
    E: Fn(&str) -> Option<String>,
    R: Fn(&[&str], &[(&str, &str)]) -> Option<String>,
{
    let var = |name: &str| {
        env(name)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    if let Some(key) = var(ENV_API_KEY) {
        return Ok((key, ApiKeySource::Env));
    }

    if let Some(path) = var("FLOWRIPPLE_OP_ENTRY_PATH") {
        let field = var("FLOWRIPPLE_OP_FIELD").unwrap_or_else(|| "API_KEY".to_string());
        let uri = format!("{}/{}", path.trim_end_matches('/'), field);
        if let Some(key) = run(&["op", "read", &uri], &[]).filter(|k| !k.is_empty()) {
            return Ok((key, ApiKeySource::OnePassword));
        }
    }

    if let Some(item) = var("FLOWRIPPLE_BW_ITEM_ID") {
        let session = var("FLOWRIPPLE_BW_SESSION");
        let extra: Vec<(&str, &str)> = session
            .as_deref()
            .map(|s| ("BW_SESSION", s))
            .into_iter()
            .collect();
        if let Some(key) = run(&["bw", "get", "password", &item], &extra).filter(|k| !k.is_empty())
        {
            return Ok((key, ApiKeySource::Bitwarden));
        }
    }

    Err(ConfigError::ApiKeyNotFound)
}

/// Run a password manager command and return its trimmed stdout; stderr is
/// discarded so the CLI's own output stays clean.
fn run_secret_cmd(args: &[&str], env_extra: &[(&str, &str)]) -> Option<String> {
    let (bin, rest) = args.split_first()?;
    let out = Command::new(bin)
        .args(rest)
        .envs(env_extra.iter().copied())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    String::from_utf8(out.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}
