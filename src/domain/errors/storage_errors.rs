use crate::domain::value_objects::{BlobName, ContainerName};

/// Errors that can occur while resolving export file content
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Blob does not exist in the resolved container
    BlobNotFound { container: String, blob: String },

    /// The storage backend rejected the proxy's own credentials
    BackendUnauthorized { message: String },

    /// Caller asked for a container outside its owner partition
    AccessDenied { container: String, owner_id: String },

    /// Validation error
    ValidationError { message: String },

    /// Infrastructure error with external source
    InfrastructureError {
        message: String,
        source: Option<String>, // Store error as string to allow Clone
    },
}

impl StorageError {
    pub fn blob_not_found(container: &ContainerName, blob: &BlobName) -> Self {
        StorageError::BlobNotFound {
            container: container.as_str().to_string(),
            blob: blob.as_str().to_string(),
        }
    }

    pub fn backend_unauthorized() -> Self {
        StorageError::BackendUnauthorized {
            message: "Backend service is not authorized to access the blob. Check your configuration."
                .to_string(),
        }
    }

    /// Whether this failure is an expected, client-facing outcome
    /// rather than something an operator needs to look at.
    pub fn is_client_facing(&self) -> bool {
        matches!(
            self,
            StorageError::BlobNotFound { .. }
                | StorageError::AccessDenied { .. }
                | StorageError::ValidationError { .. }
        )
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::BlobNotFound { container, blob } => {
                write!(f, "Blob {} does not exist in container {}", blob, container)
            }
            StorageError::BackendUnauthorized { message } => write!(f, "{}", message),
            StorageError::AccessDenied {
                container,
                owner_id,
            } => {
                write!(
                    f,
                    "Owner '{}' is not allowed to read container '{}'",
                    owner_id, container
                )
            }
            StorageError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
            StorageError::InfrastructureError { message, .. } => {
                write!(f, "Infrastructure error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
