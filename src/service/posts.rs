use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    halo::{
        ApiError, CONSOLE_POSTS, CONTENT_POSTS,
        payload::{self, PostDraft},
    },
    service::HaloService,
};

#[derive(Debug, Clone, Default)]
pub struct PublishRequest {
    pub title: String,
    pub content: String,
    pub slug: Option<String>,
}

/// Which creation endpoint produced the post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatePath {
    Draft,
    ContentFallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPost {
    pub title: String,
    pub name: String,
    pub slug: String,
    pub url: String,
    pub path: CreatePath,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("configuration missing: set the Halo URL and token")]
    ConfigMissing,

    #[error("cannot resolve the post author; configure halo_owner or check the token")]
    MissingOwner,

    #[error("post creation failed: {fallback}")]
    CreateFailed { draft: ApiError, fallback: ApiError },

    /// The post exists on the server; only the publish step failed.
    #[error("post {name} created but publishing failed: {source}")]
    PublishFailed {
        name: String,
        path: CreatePath,
        source: ApiError,
    },
}

impl PublishError {
    pub fn resource_created(&self) -> bool {
        matches!(self, Self::PublishFailed { .. })
    }
}

impl HaloService {
    /// Draft-create then publish, falling back to single-resource creation
    /// when the console draft endpoint errors for any reason.
    pub async fn publish_post(
        &self,
        request: PublishRequest,
    ) -> Result<PublishedPost, PublishError> {
        if !self.client().is_configured() {
            return Err(PublishError::ConfigMissing);
        }
        let slug = payload::resolve_slug(request.slug.as_deref(), chrono::Utc::now().timestamp());
        let owner = self
            .effective_owner()
            .await
            .ok_or(PublishError::MissingOwner)?;

        let draft = PostDraft {
            title: request.title,
            slug: slug.clone(),
            content: request.content,
            owner,
        };

        let (path, name, head_snapshot) = match self
            .client()
            .post_json(CONSOLE_POSTS, payload::build_draft_payload(&draft))
            .await
        {
            Ok(created) => {
                let post = created.get("post").unwrap_or(&created);
                let name = payload::metadata_name(&created)
                    .or_else(|| payload::metadata_name(post))
                    .unwrap_or_else(|| slug.clone());
                (CreatePath::Draft, name, payload::head_snapshot(post))
            }
            Err(draft_err) => {
                warn!("draft endpoint failed ({}), falling back to content API", draft_err.kind());
                let created = self
                    .client()
                    .post_json(CONTENT_POSTS, payload::build_content_post_payload(&draft))
                    .await
                    .map_err(|fallback| PublishError::CreateFailed {
                        draft: draft_err,
                        fallback,
                    })?;
                let name = payload::metadata_name(&created).unwrap_or_else(|| slug.clone());
                (
                    CreatePath::ContentFallback,
                    name,
                    payload::head_snapshot(&created),
                )
            }
        };

        self.publish_existing(&name, head_snapshot.as_deref())
            .await
            .map_err(|source| PublishError::PublishFailed {
                name: name.clone(),
                path,
                source,
            })?;

        let url = format!("{}/archives/{}", self.base_url(), slug);
        info!("published post {name} via {path:?}: {url}");
        Ok(PublishedPost {
            title: draft.title().to_string(),
            name,
            slug,
            url,
            path,
        })
    }

    pub async fn publish_existing(
        &self,
        name: &str,
        head_snapshot: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.client()
            .put(&payload::publish_path(name, head_snapshot))
            .await
    }
}
