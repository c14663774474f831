use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use tracing::debug;
use url::Url;

use crate::{
    domain::errors::{UpstreamError, UpstreamResult},
    ports::upstream::{ExportStatusSource, UpstreamResponse},
};

/// Polls export job status on the upstream FHIR service over HTTP
#[derive(Debug, Clone)]
pub struct HttpExportStatusSource {
    client: reqwest::Client,
    base_url: Url,
    bearer_token: Option<String>,
}

impl HttpExportStatusSource {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            bearer_token: None,
        }
    }

    /// Token the proxy presents to the upstream service
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// `{base}/_operations/export/{job_id}`
    pub fn status_url(&self, job_id: &str) -> UpstreamResult<Url> {
        let valid = !job_id.is_empty()
            && job_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && job_id != "."
            && job_id != "..";
        if !valid {
            return Err(UpstreamError::InvalidJobId(job_id.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                UpstreamError::InvalidResponse(format!(
                    "upstream base url cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["_operations", "export", job_id]);

        Ok(url)
    }
}

#[async_trait]
impl ExportStatusSource for HttpExportStatusSource {
    async fn fetch_status(&self, job_id: &str) -> UpstreamResult<UpstreamResponse> {
        let url = self.status_url(job_id)?;
        debug!(url = %url, "Polling upstream export status");

        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Unreachable(e.to_string()))?;

        // reqwest and axum sit on different `http` major versions
        let status = StatusCode::from_u16(response.status().as_u16())
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;

        let mut headers = HeaderMap::new();
        for (name, value) in response.headers() {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_str().as_bytes()),
                HeaderValue::from_bytes(value.as_bytes()),
            ) {
                headers.append(name, value);
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}
