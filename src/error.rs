use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

/// Problems with the upload itself. Raised before any remote call is made.
#[derive(ThisError, Debug)]
pub enum ValidationError {
    #[error("No image uploaded")]
    NoImage,

    #[error("Unsupported image type '{mime_type}', expected a JPEG or PNG")]
    UnsupportedType { mime_type: String },

    #[error("Uploaded image is larger than the allowed upload size")]
    TooLarge,

    #[error("Failed to parse multipart data: {message}")]
    MalformedUpload { message: String },
}

#[derive(ThisError, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transport, HTTP status or decoding failure talking to the model.
    #[error("{0:#}")]
    RemoteCall(anyhow::Error),

    /// The model answered without any text in its first candidate.
    #[error("No text returned by the model")]
    EmptyResponse,
}

impl AnalysisError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::Validation(ValidationError::UnsupportedType { .. }) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            AnalysisError::Validation(ValidationError::TooLarge) => StatusCode::PAYLOAD_TOO_LARGE,
            AnalysisError::Validation(_) => StatusCode::BAD_REQUEST,
            AnalysisError::RemoteCall(_) | AnalysisError::EmptyResponse => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message shown to the user in place of the analysis.
    pub fn user_message(&self) -> String {
        format!("Error occurred: {self}")
    }

    pub fn log(&self) {
        match self {
            AnalysisError::Validation(_) => tracing::debug!("Rejected upload: {}", self),
            AnalysisError::RemoteCall(_) => tracing::error!("Model call failed: {}", self),
            AnalysisError::EmptyResponse => tracing::warn!("Model returned no text"),
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        (status, Json(json!({ "error": self.user_message() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_wraps_underlying_error() {
        let err = AnalysisError::RemoteCall(
            anyhow::anyhow!("connection refused").context("HTTP request (generateContent) failed"),
        );
        assert_eq!(
            err.user_message(),
            "Error occurred: HTTP request (generateContent) failed: connection refused"
        );
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn validation_errors_map_to_client_statuses() {
        let no_image: AnalysisError = ValidationError::NoImage.into();
        assert_eq!(no_image.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(no_image.user_message(), "Error occurred: No image uploaded");

        let wrong_type: AnalysisError = ValidationError::UnsupportedType {
            mime_type: "image/gif".into(),
        }
        .into();
        assert_eq!(wrong_type.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
