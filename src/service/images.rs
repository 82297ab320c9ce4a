use reqwest::multipart::{Form, Part};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    halo::{ATTACHMENT_UPLOAD, ApiError},
    service::HaloService,
};

// Halo accepts the upload either way; the real format is not sniffed.
const UPLOAD_MIME: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("no image found in the message")]
    NoImage,

    #[error("cannot download the source image: {0}")]
    Download(String),

    #[error("upload to Halo failed: {0}")]
    Upload(ApiError),
}

impl HaloService {
    /// Downloads `image_url` and re-uploads it as an attachment; returns the permalink.
    pub async fn upload_image_from_url(&self, image_url: &str) -> Result<String, UploadError> {
        let image_url = image_url.trim();
        if image_url.is_empty() {
            return Err(UploadError::NoImage);
        }
        if !self.client().is_configured() {
            return Err(UploadError::Upload(ApiError::ConfigMissing));
        }
        let bytes = self.client().download(image_url).await.map_err(|reason| {
            warn!("download {image_url} failed: {reason}");
            UploadError::Download(reason)
        })?;
        self.upload_image_bytes(bytes).await
    }

    pub async fn upload_image_bytes(&self, bytes: Vec<u8>) -> Result<String, UploadError> {
        let file_name = format!("upload_{}.jpg", chrono::Utc::now().timestamp());
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(UPLOAD_MIME)
            .map_err(|err| UploadError::Upload(ApiError::network(err)))?;
        let form = Form::new()
            .part("file", part)
            .text("policy", "default")
            .text("group", "default");

        let uploaded = self
            .client()
            .post_multipart(ATTACHMENT_UPLOAD, form)
            .await
            .map_err(UploadError::Upload)?;
        let permalink = uploaded
            .pointer("/spec/permalink")
            .and_then(|value| value.as_str())
            .unwrap_or_default()
            .to_string();
        info!("uploaded attachment: {permalink}");
        Ok(permalink)
    }
}
