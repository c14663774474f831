use http::StatusCode;
use thiserror::Error;

/// What went wrong inside an output filter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterErrorKind {
    /// A manifest entry lives outside the caller's owner partition
    #[error("export access attempted with a token for the wrong owner. Owner: {owner_id}. Container: {segment}.")]
    OwnershipViolation { owner_id: String, segment: String },

    /// The job-status body did not have the shape the filter expects
    #[error("could not process export check result: {reason}")]
    MalformedManifest { reason: String },
}

/// Structured error produced by an output filter.
///
/// Never carries a partially transformed manifest. `response_body` holds the
/// untouched upstream body for operators and is only echoed to the client in
/// debug mode.
#[derive(Debug, Clone, Error)]
#[error("{name} ({id}): {kind}")]
pub struct FilterError {
    pub name: String,
    pub id: String,
    pub fatal: bool,
    pub status_code: StatusCode,
    pub kind: FilterErrorKind,
    pub response_body: Option<String>,
}

impl FilterError {
    pub fn ownership_violation(
        name: &str,
        id: &str,
        owner_id: impl Into<String>,
        segment: impl Into<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            id: id.to_string(),
            fatal: true,
            status_code: StatusCode::UNAUTHORIZED,
            kind: FilterErrorKind::OwnershipViolation {
                owner_id: owner_id.into(),
                segment: segment.into(),
            },
            response_body: None,
        }
    }

    pub fn malformed_manifest(
        name: &str,
        id: &str,
        reason: impl Into<String>,
        response_body: Option<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            id: id.to_string(),
            fatal: true,
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            kind: FilterErrorKind::MalformedManifest {
                reason: reason.into(),
            },
            response_body,
        }
    }

    pub fn with_response_body(mut self, body: impl Into<String>) -> Self {
        self.response_body = Some(body.into());
        self
    }

    pub fn is_ownership_violation(&self) -> bool {
        matches!(self.kind, FilterErrorKind::OwnershipViolation { .. })
    }
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ownership_violation_is_fatal_unauthorized() {
        let err = FilterError::ownership_violation("Filter", "abc", "cid123", "other");
        assert!(err.fatal);
        assert_eq!(err.status_code, StatusCode::UNAUTHORIZED);
        assert!(err.is_ownership_violation());

        let message = err.to_string();
        assert!(message.contains("cid123"));
        assert!(message.contains("other"));
        assert!(message.contains("abc"));
    }

    #[test]
    fn test_malformed_manifest_keeps_body() {
        let err = FilterError::malformed_manifest(
            "Filter",
            "abc",
            "missing output",
            Some("{}".to_string()),
        );
        assert_eq!(err.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.response_body.as_deref(), Some("{}"));
        assert!(!err.is_ownership_violation());
    }
}
