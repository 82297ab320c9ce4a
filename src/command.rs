//! Direct chat commands. Each command yields one or more user-facing messages.

use async_stream::stream;
use futures::stream::BoxStream;

use crate::{
    mcp::adapter::{publish_failure, upload_failure},
    service::{HaloService, PublishRequest, PublishedPost, UploadError},
};

pub const REPLY_HINT: &str = "\n💡 To have the assistant reply, say: 'reply to comment [ID] ...'";

/// One piece of an inbound chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageComponent {
    Plain(String),
    Image { url: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundMessage {
    pub components: Vec<MessageComponent>,
}

impl InboundMessage {
    pub fn first_image_url(&self) -> Option<&str> {
        self.components.iter().find_map(|component| match component {
            MessageComponent::Image { url } if !url.trim().is_empty() => Some(url.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone)]
pub enum Command {
    PublishBlogPost {
        title: String,
        content: String,
        slug: Option<String>,
    },
    GetBlogComments,
    ReplyBlogComment {
        comment_id: String,
        content: String,
    },
    /// Uploads the first image attached to the message.
    UploadBlogImage(InboundMessage),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PublishBlogPost { .. } => "publish_blog_post",
            Self::GetBlogComments => "get_blog_comments",
            Self::ReplyBlogComment { .. } => "reply_blog_comment",
            Self::UploadBlogImage(_) => "upload_blog_image",
        }
    }
}

const NO_IMAGE: &str = "⚠️ Send the command together with an image.";

pub fn run(service: &HaloService, command: Command) -> BoxStream<'_, String> {
    Box::pin(stream! {
        match command {
            Command::PublishBlogPost { title, content, slug } => {
                let request = PublishRequest { title, content, slug };
                match service.publish_post(request).await {
                    Ok(post) => {
                        let PublishedPost { title, url, .. } = post;
                        yield format!("✅ Published!\nTitle: {title}\n🔗 Link: {url}");
                    }
                    Err(err) => {
                        yield format!("❌ {}", publish_failure(&err));
                    }
                }
            }
            Command::GetBlogComments => {
                match service.list_recent_comments().await {
                    Err(err) => {
                        yield format!("❌ Fetch failed: {err}");
                    }
                    Ok(comments) if comments.is_empty() => {
                        yield "📭 No new comments.".to_string();
                    }
                    Ok(comments) => {
                        let mut lines = vec!["📝 Latest 5 comments:".to_string()];
                        for comment in &comments {
                            lines.push(format!(
                                "--------------\n👤 {}: {}\n🆔 ID: {}",
                                comment.author, comment.preview, comment.id
                            ));
                        }
                        lines.push(REPLY_HINT.to_string());
                        yield lines.join("\n");
                    }
                }
            }
            Command::ReplyBlogComment { comment_id, content } => {
                match service.reply_comment(&comment_id, &content).await {
                    Ok(_) => {
                        yield "✅ Reply posted!".to_string();
                    }
                    Err(err) => {
                        yield format!("❌ {err}");
                    }
                }
            }
            Command::UploadBlogImage(message) => {
                let url = message.first_image_url().map(str::to_string);
                match url {
                    None => {
                        yield NO_IMAGE.to_string();
                    }
                    Some(url) => {
                        yield "⏳ Downloading and uploading...".to_string();
                        match service.upload_image_from_url(&url).await {
                            Ok(permalink) => {
                                yield format!("✅ Uploaded!\n🔗 Link: {permalink}");
                            }
                            Err(UploadError::NoImage) => {
                                yield NO_IMAGE.to_string();
                            }
                            Err(err) => {
                                yield format!("❌ {}", upload_failure(&err));
                            }
                        }
                    }
                }
            }
        }
    })
}
