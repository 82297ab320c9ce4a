use thiserror::Error;

pub const MAX_DETAILS_CHARS: usize = 200;

/// Failure of a single call against the Halo REST API.
///
/// Every fault the HTTP wrapper can hit lands in one of these variants, so
/// callers match on the kind instead of probing a response map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("configuration missing: set the Halo URL and token")]
    ConfigMissing,

    #[error("API Error {status}: {details}")]
    Http { status: u16, details: String },

    #[error("malformed response: {details}")]
    MalformedResponse { details: String },

    #[error("network exception: {details}")]
    Network { details: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn http(status: u16, body: &str) -> Self {
        Self::Http {
            status,
            details: truncate_chars(body, MAX_DETAILS_CHARS),
        }
    }

    pub fn malformed(body: &str) -> Self {
        Self::MalformedResponse {
            details: truncate_chars(body, MAX_DETAILS_CHARS),
        }
    }

    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network {
            details: truncate_chars(&err.to_string(), MAX_DETAILS_CHARS),
        }
    }

    /// Short machine-readable label.
    pub fn kind(&self) -> String {
        match self {
            Self::ConfigMissing => "configuration missing".to_string(),
            Self::Http { status, .. } => format!("API Error {status}"),
            Self::MalformedResponse { .. } => "malformed response".to_string(),
            Self::Network { .. } => "network exception".to_string(),
        }
    }

    /// Human-readable details, already truncated.
    pub fn details(&self) -> &str {
        match self {
            Self::ConfigMissing => "configure the Halo URL and token for this plug-in",
            Self::Http { details, .. }
            | Self::MalformedResponse { details }
            | Self::Network { details } => details,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub(crate) fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
