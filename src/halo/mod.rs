pub mod client;
pub mod error;
pub mod model;
pub mod payload;

pub use client::{HaloClient, RequestBody};
pub use error::{ApiError, ApiResult};

pub const API_CONTENT: &str = "content.halo.run/v1alpha1";
pub const API_CONSOLE: &str = "api.console.halo.run/v1alpha1";

pub const CONSOLE_POSTS: &str = "/apis/api.console.halo.run/v1alpha1/posts";
pub const CONTENT_POSTS: &str = "/apis/content.halo.run/v1alpha1/posts";
pub const CONTENT_COMMENTS: &str = "/apis/content.halo.run/v1alpha1/comments";
pub const RECENT_COMMENTS: &str =
    "/apis/content.halo.run/v1alpha1/comments?sort=metadata.creationTimestamp,desc&page=0&size=5";
pub const CONSOLE_USER_ME: &str = "/apis/api.console.halo.run/v1alpha1/users/me";
pub const UC_USER_ME: &str = "/apis/api.uc.halo.run/v1alpha1/users/me";
pub const CONSOLE_USER_LIST: &str = "/apis/api.console.halo.run/v1alpha1/users?page=0&size=1";
pub const ATTACHMENT_UPLOAD: &str = "/apis/api.console.halo.run/v1alpha1/attachments/upload";
