use reqwest::{
    Method, StatusCode,
    header::{ACCEPT, CONTENT_TYPE},
    multipart::Form,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::HaloConfig,
    halo::error::{ApiError, ApiResult, truncate_chars},
};

const LOG_BODY_CHARS: usize = 100;

pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Form),
}

/// Authenticated client for one Halo site.
///
/// Never returns a transport error past its boundary: every failure becomes an
/// [`ApiError`].
#[derive(Debug, Clone)]
pub struct HaloClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl HaloClient {
    pub fn new(config: &HaloConfig) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().unwrap_or_else(|err| {
            warn!("build http client failed, using defaults: {err}");
            reqwest::Client::new()
        });
        Self {
            http,
            base_url: config.base_url(),
            token: config.token(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.token.is_empty()
    }

    pub async fn get(&self, path: &str) -> ApiResult<Value> {
        self.request(Method::GET, path, RequestBody::Empty).await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> ApiResult<Value> {
        self.request(Method::POST, path, RequestBody::Json(body)).await
    }

    pub async fn put(&self, path: &str) -> ApiResult<Value> {
        self.request(Method::PUT, path, RequestBody::Empty).await
    }

    pub async fn post_multipart(&self, path: &str, form: Form) -> ApiResult<Value> {
        self.request(Method::POST, path, RequestBody::Multipart(form))
            .await
    }

    pub async fn request(&self, method: Method, path: &str, body: RequestBody) -> ApiResult<Value> {
        if !self.is_configured() {
            return Err(ApiError::ConfigMissing);
        }

        let url = format!("{}{}", self.base_url, path);
        debug!("halo request {method} {url}");
        let mut request = self
            .http
            .request(method, &url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json");
        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request
                .header(CONTENT_TYPE, "application/json")
                .body(value.to_string()),
            RequestBody::Multipart(form) => request.multipart(form),
        };

        let response = request.send().await.map_err(|err| {
            warn!("halo request {url} failed: {err}");
            ApiError::network(err)
        })?;
        let status = response.status();
        let text = response.text().await.map_err(|err| {
            warn!("read halo response from {url} failed: {err}");
            ApiError::network(err)
        })?;

        decode_response(status, &text)
    }

    /// Plain unauthenticated GET used to pull remote images.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, String> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| format!("download exception: {err}"))?;
        if response.status() != StatusCode::OK {
            return Err(format!("download returned status {}", response.status().as_u16()));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| format!("download exception: {err}"))?;
        Ok(bytes.to_vec())
    }
}

pub(crate) fn decode_response(status: StatusCode, text: &str) -> ApiResult<Value> {
    if status.as_u16() >= 400 {
        warn!(
            "API Error {}: {}",
            status.as_u16(),
            truncate_chars(text, LOG_BODY_CHARS)
        );
        return Err(ApiError::http(status.as_u16(), text));
    }
    if text.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(text).map_err(|_| {
        warn!("invalid JSON response: {}", truncate_chars(text, LOG_BODY_CHARS));
        ApiError::malformed(text)
    })
}
