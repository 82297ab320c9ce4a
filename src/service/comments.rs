use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::{
    halo::{
        ApiError, CONTENT_COMMENTS, RECENT_COMMENTS,
        model::{Comment, CommentList},
        payload,
    },
    service::HaloService,
};

pub const ANONYMOUS_AUTHOR: &str = "Anonymous";
pub const EMPTY_CONTENT: &str = "(no content)";
pub const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSummary {
    pub id: String,
    pub author: String,
    pub preview: String,
}

impl From<&Comment> for CommentSummary {
    fn from(comment: &Comment) -> Self {
        let content = comment.spec.content.as_deref().unwrap_or(EMPTY_CONTENT);
        let preview = match content.char_indices().nth(PREVIEW_CHARS) {
            Some((byte_index, _)) => format!("{}...", &content[..byte_index]),
            None => content.to_string(),
        };
        Self {
            id: comment.id().unwrap_or_default().to_string(),
            author: comment.author().unwrap_or(ANONYMOUS_AUTHOR).to_string(),
            preview,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplyError {
    #[error("comment not found (ID: {0})")]
    CommentNotFound(String),

    #[error("cannot resolve the post the comment belongs to")]
    MissingParentPost,

    #[error("reply failed: {0}")]
    Api(ApiError),
}

impl HaloService {
    /// Five newest comments, newest first.
    pub async fn list_recent_comments(&self) -> Result<Vec<CommentSummary>, ApiError> {
        let body = self.client().get(RECENT_COMMENTS).await?;
        let list: CommentList =
            serde_json::from_value(body).map_err(|err| ApiError::malformed(&err.to_string()))?;
        Ok(list.items.iter().map(CommentSummary::from).collect())
    }

    /// Replies under `comment_id`; returns the new comment's id.
    pub async fn reply_comment(
        &self,
        comment_id: &str,
        content: &str,
    ) -> Result<String, ReplyError> {
        let comment_id = comment_id.trim();
        let original = self
            .client()
            .get(&format!("{CONTENT_COMMENTS}/{comment_id}"))
            .await
            .map_err(|err| match err {
                ApiError::ConfigMissing => ReplyError::Api(err),
                _ => ReplyError::CommentNotFound(comment_id.to_string()),
            })?;
        let original: Comment = serde_json::from_value(original).unwrap_or_default();
        let post_name = original
            .subject_name()
            .ok_or(ReplyError::MissingParentPost)?;

        let reply_id = Uuid::new_v4().to_string();
        self.client()
            .post_json(
                CONTENT_COMMENTS,
                payload::build_reply_payload(&reply_id, post_name, comment_id, content),
            )
            .await
            .map_err(ReplyError::Api)?;
        info!("replied to comment {comment_id} on post {post_name} as {reply_id}");
        Ok(reply_id)
    }
}
