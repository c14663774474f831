use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::{
    adapters::inbound::http::{
        dto::ErrorResponseDto, middleware::VerifiedOwner, router::AppState,
    },
    domain::{
        errors::UpstreamError,
        models::{PipelineType, RequestContext},
    },
};

/// Upstream headers relayed to the client alongside the status body
const FORWARDED_HEADERS: [header::HeaderName; 3] =
    [header::RETRY_AFTER, header::EXPIRES, header::CONTENT_TYPE];
const X_PROGRESS: &str = "x-progress";

/// Poll an export job and return the owner-checked, proxied manifest
pub async fn get_export_status(
    State(app_state): State<AppState>,
    VerifiedOwner(owner): VerifiedOwner,
    Path(job_id): Path<String>,
    uri: Uri,
) -> Result<Response, (StatusCode, Json<ErrorResponseDto>)> {
    let upstream = app_state
        .status_source
        .fetch_status(&job_id)
        .await
        .map_err(|e| {
            let status_code = match e {
                UpstreamError::InvalidJobId(_) => StatusCode::BAD_REQUEST,
                _ => {
                    error!(job_id = %job_id, error = %e, "Export status poll failed");
                    StatusCode::BAD_GATEWAY
                }
            };
            (
                status_code,
                Json(ErrorResponseDto::from_upstream_error(e, app_state.debug)),
            )
        })?;

    let context = RequestContext::new(
        PipelineType::ExportCheck,
        upstream.status,
        uri,
        owner,
        upstream.body,
    );
    let transformed = context.is_completed_export_check();

    let context = app_state.export_filter.execute(context).map_err(|e| {
        if e.is_ownership_violation() {
            warn!(job_id = %job_id, filter_id = %e.id, "Rejected export status for foreign owner");
        }
        (
            e.status_code,
            Json(ErrorResponseDto::from_filter_error(&e, app_state.debug)),
        )
    })?;

    let mut headers = HeaderMap::new();
    for name in FORWARDED_HEADERS {
        if let Some(value) = upstream.headers.get(&name) {
            headers.insert(name, value.clone());
        }
    }
    if let Some(value) = upstream.headers.get(X_PROGRESS) {
        headers.insert(X_PROGRESS, value.clone());
    }
    if transformed {
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    Ok((context.status_code, headers, context.body).into_response())
}
