//! API error type and its JSON error body.

use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::response::{IntoResponse, Response};
use crate::status::Status;
use crate::store::StoreError;

/// Body of every error response: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "User not found")]
    pub error: String,
}

/// Everything a user handler can fail with.
///
/// The `Display` text is exactly what the client sees in `error`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("User not found")]
    NotFound,
    /// The `{id}` path segment is not an unsigned integer.
    #[error("Invalid user id")]
    InvalidId,
    /// Malformed JSON, a missing field or a field of the wrong type.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[source] serde_json::Error),
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    /// A response body could not be serialized. Details go to the log only.
    #[error("Internal server error")]
    Serialize(#[source] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            Self::NotFound => Status::NotFound,
            Self::InvalidId | Self::InvalidBody(_) | Self::EmptyField(_) => Status::BadRequest,
            Self::Serialize(_) => Status::InternalServerError,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Serialize(e) = &self {
            error!(error = %e, "failed to serialize response body");
        }
        // A `Value` always serializes, unlike an arbitrary `T: Serialize`.
        let body = serde_json::json!({ "error": self.to_string() }).to_string();
        Response::builder().status(self.status()).json(body)
    }
}
