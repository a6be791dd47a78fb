use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

/// Failures surfaced by the gateway. Parse misses never appear here; they are
/// absorbed into fallback output before reaching a caller.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("GEMINI_API_KEY is not configured")]
    NotConfigured,

    #[error("Gemini request failed: {reason}")]
    Transport { reason: String },

    #[error("no content generated from Gemini API")]
    EmptyResponse,

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("invalid roster: {reason}")]
    Roster { reason: String },

    #[error("failed to encode response: {reason}")]
    Encode { reason: String },
}

impl GatewayError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        GatewayError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        GatewayError::Transport {
            reason: reason.into(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            GatewayError::NotConfigured => "AI service not configured",
            GatewayError::InvalidInput { .. } => "Invalid input",
            GatewayError::Roster { .. } => "Invalid roster",
            GatewayError::Transport { .. }
            | GatewayError::EmptyResponse
            | GatewayError::Encode { .. } => "Failed to process AI request",
        }
    }

    fn public_message(&self) -> String {
        match self {
            GatewayError::NotConfigured => {
                "Please add GEMINI_API_KEY to environment variables".to_string()
            }
            GatewayError::InvalidInput { reason } | GatewayError::Roster { reason } => {
                reason.clone()
            }
            GatewayError::Transport { .. }
            | GatewayError::EmptyResponse
            | GatewayError::Encode { .. } => {
                "An error occurred while processing your request".to_string()
            }
        }
    }
}

impl From<csv::Error> for GatewayError {
    fn from(err: csv::Error) -> Self {
        GatewayError::Roster {
            reason: err.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidInput { .. } | GatewayError::Roster { .. } => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::Transport { .. }
            | GatewayError::EmptyResponse
            | GatewayError::Encode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.label().to_string(),
            message: self.public_message(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classes_follow_error_kind() {
        assert_eq!(
            GatewayError::invalid_input("missing").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::NotConfigured.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            GatewayError::transport("503 Service Unavailable").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn transport_details_stay_out_of_public_message() {
        let err = GatewayError::transport("connection refused to 10.0.0.4");
        assert!(!err.public_message().contains("10.0.0.4"));
    }
}
