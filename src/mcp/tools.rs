use rmcp::{
    ErrorData as McpError,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content},
    tool, tool_router,
};

use crate::mcp::{
    adapter,
    dto::{PublishBlogPostRequest, ReplyBlogCommentRequest, UploadBlogImageRequest},
    server::HaloMcpServer,
};

#[tool_router(router = tool_router)]
impl HaloMcpServer {
    pub(crate) fn build_tool_router() -> ToolRouter<HaloMcpServer> {
        Self::tool_router()
    }

    #[tool(
        name = "publish_blog_post",
        description = "Publish a new post on the Halo blog. Use when the user asks to write, post or publish a blog article."
    )]
    async fn publish_blog_post(
        &self,
        Parameters(params): Parameters<PublishBlogPostRequest>,
    ) -> Result<CallToolResult, McpError> {
        let summary = adapter::publish_blog_post(&self.service, params).await;
        Ok(text_result(summary))
    }

    #[tool(
        name = "get_blog_comments",
        description = "Fetch the latest comments on the Halo blog. Use when the user asks about new comments."
    )]
    async fn get_blog_comments(&self) -> Result<CallToolResult, McpError> {
        let summary = adapter::get_blog_comments(&self.service).await;
        Ok(text_result(summary))
    }

    #[tool(
        name = "reply_blog_comment",
        description = "Reply to a comment on the Halo blog. Use when the user asks to answer a specific comment."
    )]
    async fn reply_blog_comment(
        &self,
        Parameters(params): Parameters<ReplyBlogCommentRequest>,
    ) -> Result<CallToolResult, McpError> {
        let summary = adapter::reply_blog_comment(&self.service, params).await;
        Ok(text_result(summary))
    }

    #[tool(
        name = "upload_blog_image",
        description = "Upload the image at the given URL to the Halo blog. Use when the user wants an image link stored on the blog."
    )]
    async fn upload_blog_image(
        &self,
        Parameters(params): Parameters<UploadBlogImageRequest>,
    ) -> Result<CallToolResult, McpError> {
        let summary = adapter::upload_blog_image(&self.service, params).await;
        Ok(text_result(summary))
    }
}

fn text_result(summary: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(summary)])
}
