use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::{
    adapters::inbound::http::{
        dto::{ErrorResponseDto, HealthResponseDto},
        middleware::VerifiedOwner,
        router::AppState,
    },
    domain::{
        errors::StorageError,
        value_objects::{BlobName, ContainerName},
    },
};

/// Content type of exported files
pub const NDJSON_CONTENT_TYPE: &str = "application/fhir+ndjson";

/// Serve an export file listed in a rewritten manifest
pub async fn get_export_file(
    State(app_state): State<AppState>,
    VerifiedOwner(owner): VerifiedOwner,
    Path((container, blob)): Path<(String, String)>,
) -> Result<Response, (StatusCode, Json<ErrorResponseDto>)> {
    let container = ContainerName::new(container).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponseDto::from_validation_error(e)),
        )
    })?;

    if owner.container() != &container {
        warn!(owner_id = %owner, container = %container, "Export file requested outside owner partition");
        let err = StorageError::AccessDenied {
            container: container.as_str().to_string(),
            owner_id: owner.as_str().to_string(),
        };
        return Err((
            StatusCode::from(err.clone()),
            Json(ErrorResponseDto::from_storage_error(err, app_state.debug)),
        ));
    }

    let blob = BlobName::new(blob).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponseDto::from_validation_error(e)),
        )
    })?;

    let content = app_state
        .resolver
        .resolve(&container, &blob)
        .await
        .map_err(|e| {
            if !e.is_client_facing() {
                error!(container = %container, blob = %blob, error = %e, "Export file resolution failed");
            }
            let status_code = StatusCode::from(e.clone());
            (
                status_code,
                Json(ErrorResponseDto::from_storage_error(e, app_state.debug)),
            )
        })?;

    let etag = format!("\"{:x}\"", md5::compute(&content));

    Ok((
        [
            (header::CONTENT_TYPE, NDJSON_CONTENT_TYPE.to_string()),
            (header::ETAG, etag),
        ],
        content,
    )
        .into_response())
}

/// Liveness probe
pub async fn health() -> Json<HealthResponseDto> {
    Json(HealthResponseDto::ok())
}
