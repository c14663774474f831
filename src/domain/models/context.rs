use http::{StatusCode, Uri};

use crate::domain::value_objects::OwnerId;

/// Tag identifying which export operation a pipeline is processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineType {
    /// `$export` kick-off
    Export,
    /// Polling the status of an export job
    ExportCheck,
    /// Fetching one of the files listed in a manifest
    ExportFile,
}

impl PipelineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineType::Export => "Export",
            PipelineType::ExportCheck => "ExportCheck",
            PipelineType::ExportFile => "ExportFile",
        }
    }
}

impl std::fmt::Display for PipelineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request/response envelope handed to output filters
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub pipeline_type: PipelineType,
    pub status_code: StatusCode,
    pub request_uri: Uri,
    pub owner_id: OwnerId,
    pub body: String,
}

impl RequestContext {
    pub fn new(
        pipeline_type: PipelineType,
        status_code: StatusCode,
        request_uri: Uri,
        owner_id: OwnerId,
        body: impl Into<String>,
    ) -> Self {
        Self {
            pipeline_type,
            status_code,
            request_uri,
            owner_id,
            body: body.into(),
        }
    }

    /// Whether this is a successfully completed export status poll
    pub fn is_completed_export_check(&self) -> bool {
        self.pipeline_type == PipelineType::ExportCheck && self.status_code == StatusCode::OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(pipeline_type: PipelineType, status_code: StatusCode) -> RequestContext {
        RequestContext::new(
            pipeline_type,
            status_code,
            Uri::from_static("/_operations/export/1"),
            OwnerId::new("cid123".to_string()).unwrap(),
            "",
        )
    }

    #[test]
    fn test_completed_export_check() {
        assert!(context(PipelineType::ExportCheck, StatusCode::OK).is_completed_export_check());
        assert!(!context(PipelineType::ExportCheck, StatusCode::ACCEPTED).is_completed_export_check());
        assert!(!context(PipelineType::Export, StatusCode::OK).is_completed_export_check());
        assert!(!context(PipelineType::ExportFile, StatusCode::OK).is_completed_export_check());
    }
}
