use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::errors::{FilterError, StorageError, UpstreamError, ValidationError};

/// DTO for error responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
    pub timestamp: DateTime<Utc>,
}

/// DTO for the health endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponseDto {
    pub status: String,
}

impl ErrorResponseDto {
    pub fn new(error: &str, message: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::new("Unauthorized", message)
    }

    pub fn from_validation_error(error: ValidationError) -> Self {
        Self::bad_request(&error.to_string())
    }

    /// Structured filter error. Message and raw upstream body are only
    /// included when `debug` is set; the rest is always present.
    pub fn from_filter_error(error: &FilterError, debug: bool) -> Self {
        let mut details = HashMap::new();
        details.insert("id".to_string(), Value::String(error.id.clone()));
        details.insert("fatal".to_string(), Value::Bool(error.fatal));
        details.insert(
            "statusCode".to_string(),
            Value::Number(error.status_code.as_u16().into()),
        );

        let message = if debug {
            if let Some(body) = &error.response_body {
                details.insert("responseBody".to_string(), Value::String(body.clone()));
            }
            error.to_string()
        } else {
            error
                .status_code
                .canonical_reason()
                .unwrap_or("Error")
                .to_string()
        };

        Self {
            error: error.name.clone(),
            message,
            details: Some(details),
            timestamp: Utc::now(),
        }
    }

    pub fn from_storage_error(error: StorageError, debug: bool) -> Self {
        let mut details = HashMap::new();

        match &error {
            StorageError::BlobNotFound { container, blob } => {
                details.insert("container".to_string(), Value::String(container.clone()));
                details.insert("blob".to_string(), Value::String(blob.clone()));
            }
            StorageError::AccessDenied { container, .. } => {
                details.insert("container".to_string(), Value::String(container.clone()));
            }
            _ => {}
        }

        let message = match &error {
            StorageError::InfrastructureError { .. } if !debug => {
                "Internal server error".to_string()
            }
            _ => error.to_string(),
        };

        ErrorResponseDto {
            error: "StorageError".to_string(),
            message,
            details: if details.is_empty() {
                None
            } else {
                Some(details)
            },
            timestamp: Utc::now(),
        }
    }

    pub fn from_upstream_error(error: UpstreamError, debug: bool) -> Self {
        let message = match &error {
            UpstreamError::InvalidJobId(_) => error.to_string(),
            _ if debug => error.to_string(),
            _ => "Upstream export service error".to_string(),
        };

        Self::new("UpstreamError", &message)
    }
}

impl HealthResponseDto {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
