use std::time::Duration;

use getrandom::getrandom;
use serde::Deserialize;

pub const ENV_HALO_URL: &str = "HALO_URL";
pub const ENV_HALO_TOKEN: &str = "HALO_TOKEN";
pub const ENV_HALO_OWNER: &str = "HALO_OWNER";
pub const ENV_HALO_TIMEOUT_SECS: &str = "HALO_TIMEOUT_SECS";

/// Connection settings for a Halo site.
///
/// Field names match the keys a host plug-in stores in its config panel, so a
/// host can hand its config map straight to `serde_json::from_value`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HaloConfig {
    #[serde(default)]
    pub halo_url: String,
    #[serde(default)]
    pub halo_token: String,
    #[serde(default)]
    pub halo_owner: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl HaloConfig {
    pub fn new(halo_url: impl Into<String>, halo_token: impl Into<String>) -> Self {
        Self {
            halo_url: halo_url.into(),
            halo_token: halo_token.into(),
            ..Default::default()
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.halo_owner = Some(owner.into());
        self
    }

    pub fn from_env() -> Self {
        let read = |key: &str| std::env::var(key).unwrap_or_default();
        Self {
            halo_url: read(ENV_HALO_URL),
            halo_token: read(ENV_HALO_TOKEN),
            halo_owner: Some(read(ENV_HALO_OWNER)).filter(|value| !value.trim().is_empty()),
            request_timeout_secs: read(ENV_HALO_TIMEOUT_SECS).trim().parse::<u64>().ok(),
        }
    }

    pub fn base_url(&self) -> String {
        self.halo_url.trim().trim_end_matches('/').to_string()
    }

    pub fn token(&self) -> String {
        self.halo_token.trim().to_string()
    }

    pub fn owner(&self) -> Option<String> {
        self.halo_owner
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn is_complete(&self) -> bool {
        !self.base_url().is_empty() && !self.token().is_empty()
    }
}

pub fn generate_mcp_token() -> anyhow::Result<String> {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut bytes = [0u8; 16];
    getrandom(&mut bytes).map_err(|err| anyhow::anyhow!("generate mcp token: {err}"))?;
    Ok(bytes
        .iter()
        .map(|value| {
            let index = (*value as usize) % CHARSET.len();
            CHARSET[index] as char
        })
        .collect())
}
