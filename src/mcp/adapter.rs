//! Agent-facing tool surface: declarative descriptors plus string-returning
//! calls. The MCP router and any other host delegate here.

use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::{
    halo::ApiError,
    mcp::dto::{
        GetBlogCommentsRequest, PublishBlogPostRequest, ReplyBlogCommentRequest,
        UploadBlogImageRequest,
    },
    service::{CreatePath, HaloService, PublishError, PublishRequest, UploadError},
};

pub const PUBLISH_BLOG_POST: &str = "publish_blog_post";
pub const GET_BLOG_COMMENTS: &str = "get_blog_comments";
pub const REPLY_BLOG_COMMENT: &str = "reply_blog_comment";
pub const UPLOAD_BLOG_IMAGE: &str = "upload_blog_image";

pub const PUBLISH_BLOG_POST_DESC: &str =
    "Publish a new post on the Halo blog. Use when the user asks to write, post or publish a blog article.";
pub const GET_BLOG_COMMENTS_DESC: &str =
    "Fetch the latest comments on the Halo blog. Use when the user asks about new comments.";
pub const REPLY_BLOG_COMMENT_DESC: &str =
    "Reply to a comment on the Halo blog. Use when the user asks to answer a specific comment.";
pub const UPLOAD_BLOG_IMAGE_DESC: &str =
    "Upload the image at the given URL to the Halo blog. Use when the user wants an image link stored on the blog.";

#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

pub fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: PUBLISH_BLOG_POST,
            description: PUBLISH_BLOG_POST_DESC,
            parameters: parameters_schema::<PublishBlogPostRequest>(),
        },
        ToolDescriptor {
            name: GET_BLOG_COMMENTS,
            description: GET_BLOG_COMMENTS_DESC,
            parameters: parameters_schema::<GetBlogCommentsRequest>(),
        },
        ToolDescriptor {
            name: REPLY_BLOG_COMMENT,
            description: REPLY_BLOG_COMMENT_DESC,
            parameters: parameters_schema::<ReplyBlogCommentRequest>(),
        },
        ToolDescriptor {
            name: UPLOAD_BLOG_IMAGE,
            description: UPLOAD_BLOG_IMAGE_DESC,
            parameters: parameters_schema::<UploadBlogImageRequest>(),
        },
    ]
}

fn parameters_schema<T: JsonSchema>() -> Value {
    let mut schema =
        serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|_| json!({}));
    if let Some(object) = schema.as_object_mut() {
        object.remove("$schema");
        object.remove("title");
        object.insert("type".to_string(), json!("object"));
        object.entry("properties").or_insert_with(|| json!({}));
    }
    schema
}

/// Runs the named tool with raw JSON arguments.
pub async fn dispatch(service: &HaloService, name: &str, args: Value) -> String {
    match name {
        PUBLISH_BLOG_POST => match decode::<PublishBlogPostRequest>(args) {
            Ok(params) => publish_blog_post(service, params).await,
            Err(err) => err,
        },
        GET_BLOG_COMMENTS => get_blog_comments(service).await,
        REPLY_BLOG_COMMENT => match decode::<ReplyBlogCommentRequest>(args) {
            Ok(params) => reply_blog_comment(service, params).await,
            Err(err) => err,
        },
        UPLOAD_BLOG_IMAGE => match decode::<UploadBlogImageRequest>(args) {
            Ok(params) => upload_blog_image(service, params).await,
            Err(err) => err,
        },
        other => format!("error: unknown tool {other}"),
    }
}

fn decode<T: DeserializeOwned>(args: Value) -> Result<T, String> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|err| format!("error: invalid arguments: {err}"))
}

pub async fn publish_blog_post(service: &HaloService, params: PublishBlogPostRequest) -> String {
    let request = PublishRequest {
        title: params.title,
        content: params.content,
        slug: params.slug,
    };
    match service.publish_post(request).await {
        Ok(post) => format!("Published. Title: {}, link: {}", post.title, post.url),
        Err(err) => publish_failure(&err),
    }
}

pub(crate) fn publish_failure(err: &PublishError) -> String {
    match err {
        PublishError::ConfigMissing => {
            format!("Publish failed: {}", ApiError::ConfigMissing.details())
        }
        PublishError::MissingOwner => "Publish failed: cannot resolve the post author. \
             Configure halo_owner or make sure the token is valid."
            .to_string(),
        PublishError::CreateFailed { fallback, .. } => {
            format!("Publish failed: {fallback}")
        }
        PublishError::PublishFailed { path, source, .. } => {
            let created = match path {
                CreatePath::Draft => "Draft",
                CreatePath::ContentFallback => "Post",
            };
            format!("{created} created but publishing failed: {source}")
        }
    }
}

pub async fn get_blog_comments(service: &HaloService) -> String {
    match service.list_recent_comments().await {
        Err(err) => format!("Fetch failed: {err}"),
        Ok(comments) if comments.is_empty() => "No new comments.".to_string(),
        Ok(comments) => {
            let mut lines = vec!["Latest 5 comments:".to_string()];
            lines.extend(comments.iter().map(|comment| {
                format!(
                    "User {}: {}, comment ID: {}",
                    comment.author, comment.preview, comment.id
                )
            }));
            lines.join("\n")
        }
    }
}

pub async fn reply_blog_comment(service: &HaloService, params: ReplyBlogCommentRequest) -> String {
    match service
        .reply_comment(&params.comment_id, &params.content)
        .await
    {
        Ok(_) => "Reply posted.".to_string(),
        Err(err) => err.to_string(),
    }
}

pub async fn upload_blog_image(service: &HaloService, params: UploadBlogImageRequest) -> String {
    match service.upload_image_from_url(&params.image_url).await {
        Ok(permalink) => format!("Uploaded, link: {permalink}"),
        Err(err) => upload_failure(&err),
    }
}

pub(crate) fn upload_failure(err: &UploadError) -> String {
    match err {
        UploadError::NoImage => "No image URL given.".to_string(),
        UploadError::Download(reason) => format!("Cannot download the source image ({reason})."),
        UploadError::Upload(api) => format!("Upload to Halo failed: {api}"),
    }
}
