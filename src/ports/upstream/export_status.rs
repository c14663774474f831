use async_trait::async_trait;
use http::{HeaderMap, StatusCode};

use crate::domain::errors::UpstreamResult;

/// Raw job-status response as returned by the export engine
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Port for polling the upstream bulk-export engine
#[async_trait]
pub trait ExportStatusSource: Send + Sync + 'static {
    /// Fetch the current status of an export job
    async fn fetch_status(&self, job_id: &str) -> UpstreamResult<UpstreamResponse>;
}
