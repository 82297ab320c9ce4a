use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PublishBlogPostRequest {
    /// Post title.
    pub title: String,
    /// Post body, Markdown supported.
    pub content: String,
    /// Optional URL slug. Generated automatically when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetBlogCommentsRequest {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReplyBlogCommentRequest {
    /// Unique ID of the comment to answer (as listed by get_blog_comments).
    pub comment_id: String,
    /// Reply text.
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UploadBlogImageRequest {
    /// Full, publicly reachable URL of the image.
    pub image_url: String,
}
