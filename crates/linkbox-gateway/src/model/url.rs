use linkbox_core::ShortenedLink;
use serde::{Deserialize, Serialize};

/// Successful response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Failure response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlResponse {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
}

impl From<ShortenedLink> for CreateUrlResponse {
    fn from(link: ShortenedLink) -> Self {
        Self {
            short_code: link.record.short_code.into(),
            short_url: link.short_url,
            original_url: link.record.original_url,
        }
    }
}
