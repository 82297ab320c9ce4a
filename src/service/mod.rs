pub mod comments;
pub mod images;
pub mod posts;

use std::sync::OnceLock;

use tracing::{info, warn};

use crate::{
    config::HaloConfig,
    halo::{CONSOLE_USER_LIST, CONSOLE_USER_ME, HaloClient, UC_USER_ME, payload},
};

pub use comments::{CommentSummary, ReplyError};
pub use images::UploadError;
pub use posts::{CreatePath, PublishError, PublishRequest, PublishedPost};

/// Shared context behind every command and tool call.
///
/// The only state kept between calls is the owner username resolved from the
/// token. Concurrent first lookups may both hit the network; the first stored
/// value wins and later readers see it.
#[derive(Debug)]
pub struct HaloService {
    client: HaloClient,
    configured_owner: Option<String>,
    cached_owner: OnceLock<String>,
}

impl HaloService {
    pub fn new(config: &HaloConfig) -> Self {
        if !config.is_complete() {
            warn!("Halo URL or token missing; set halo_url and halo_token before use");
        }
        Self {
            client: HaloClient::new(config),
            configured_owner: config.owner(),
            cached_owner: OnceLock::new(),
        }
    }

    pub fn client(&self) -> &HaloClient {
        &self.client
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Configured owner, else the username behind the token (looked up once).
    pub async fn effective_owner(&self) -> Option<String> {
        if let Some(owner) = &self.configured_owner {
            return Some(owner.clone());
        }
        if let Some(owner) = self.cached_owner.get() {
            return Some(owner.clone());
        }

        match self.fetch_current_username().await {
            Some(name) => {
                info!("resolved Halo owner from token: {name}");
                Some(self.cached_owner.get_or_init(|| name).clone())
            }
            None => {
                warn!("halo_owner not configured and token user lookup failed");
                None
            }
        }
    }

    async fn fetch_current_username(&self) -> Option<String> {
        for endpoint in [CONSOLE_USER_ME, UC_USER_ME] {
            if let Ok(user) = self.client.get(endpoint).await {
                if let Some(name) = payload::username(&user) {
                    return Some(name);
                }
            }
        }
        let list = self.client.get(CONSOLE_USER_LIST).await.ok()?;
        list.get("items")
            .and_then(|items| items.as_array())
            .and_then(|items| items.first())
            .and_then(payload::username)
    }
}
