//! The single HTTP exchange with the classification service
//!
//! The browser build implements [`ClassifyTransport`] with `fetch`; tests
//! use an in-memory double. Interpreting the reply is shared.

use crate::error::RequestError;
use crate::shell::UploadTicket;
use shared_types::{ErrorBody, ProcessingResponse};

/// Status and body text of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends the bundle as one multipart POST
///
/// Implementations issue exactly one request per call and never retry.
#[allow(async_fn_in_trait)]
pub trait ClassifyTransport {
    /// Platform file handle carried in the multipart part
    type File;

    async fn post_bundle(
        &self,
        ticket: &UploadTicket,
        file: &Self::File,
    ) -> Result<RawResponse, RequestError>;
}

/// Turn a raw reply into the document list or a user-facing error
pub fn interpret_response(
    raw: &RawResponse,
    generic_error: &str,
) -> Result<ProcessingResponse, RequestError> {
    if !raw.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&raw.body)
            .ok()
            .and_then(|body| body.error)
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or_else(|| generic_error.to_string());
        return Err(RequestError::Status {
            status: raw.status,
            message,
        });
    }

    serde_json::from_str::<ProcessingResponse>(&raw.body)
        .map_err(|e| RequestError::Decode(format!("Invalid response from server: {}", e)))
}
