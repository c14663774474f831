use crate::domain::{
    errors::StorageError,
    value_objects::{BlobName, ContainerName},
};

/// Convert an object_store error raised while touching `container`/`blob`
/// into a domain storage error.
pub fn map_blob_error(
    err: object_store::Error,
    container: &ContainerName,
    blob: &BlobName,
) -> StorageError {
    match err {
        object_store::Error::NotFound { .. } => StorageError::blob_not_found(container, blob),
        err => err.into(),
    }
}

/// Convert object_store errors to domain storage errors
impl From<object_store::Error> for StorageError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { path, .. } => {
                let (container, blob) = path.split_once('/').unwrap_or(("", path.as_str()));
                StorageError::BlobNotFound {
                    container: container.to_string(),
                    blob: blob.to_string(),
                }
            }
            object_store::Error::Unauthenticated { .. }
            | object_store::Error::PermissionDenied { .. } => {
                StorageError::backend_unauthorized()
            }
            object_store::Error::UnknownConfigurationKey { .. } => StorageError::BackendUnauthorized {
                message: format!("Storage backend is misconfigured: {}", err),
            },
            _ => StorageError::InfrastructureError {
                message: format!("Object store operation failed: {}", err),
                source: Some(err.to_string()),
            },
        }
    }
}

/// Convert domain StorageError to HTTP status codes for API responses
impl From<StorageError> for http::StatusCode {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::BlobNotFound { .. } => http::StatusCode::NOT_FOUND,
            StorageError::AccessDenied { .. } => http::StatusCode::UNAUTHORIZED,
            StorageError::ValidationError { .. } => http::StatusCode::BAD_REQUEST,
            StorageError::BackendUnauthorized { .. } | StorageError::InfrastructureError { .. } => {
                http::StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
