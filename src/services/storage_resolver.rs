use async_trait::async_trait;
use bytes::Bytes;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::SynthesizedCategories,
        value_objects::{BlobName, ContainerName, JobScopedBlobName},
    },
    ports::{services::ContentResolver, storage::BlobStore},
};

/// Where a requested blob is actually read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionTarget {
    /// Read the requested container/blob as is
    Direct,
    /// Read this blob from the template container instead
    Template(BlobName),
    /// Names a synthesized category but does not follow the job-scoped
    /// naming grammar; always resolves to not-found
    Unresolvable,
}

/// Serves export file content, redirecting synthesized categories to the
/// pre-staged template container.
#[derive(Clone)]
pub struct StorageResolver {
    store: Arc<dyn BlobStore>,
    template_container: ContainerName,
    synthesized_pattern: Option<Regex>,
    synthesized_names: Vec<String>,
}

impl StorageResolver {
    pub fn new(
        store: Arc<dyn BlobStore>,
        template_container: ContainerName,
        categories: &SynthesizedCategories,
    ) -> StorageResult<Self> {
        Ok(Self {
            store,
            template_container,
            synthesized_pattern: synthesized_pattern(categories)?,
            synthesized_names: categories.names().map(str::to_string).collect(),
        })
    }

    pub fn template_container(&self) -> &ContainerName {
        &self.template_container
    }

    /// Decide where `blob` should be read from
    pub fn target_for(&self, blob: &BlobName) -> ResolutionTarget {
        let Some(pattern) = &self.synthesized_pattern else {
            return ResolutionTarget::Direct;
        };

        debug!(blob = %blob, "Matching blob against synthesized categories");
        if !pattern.is_match(blob.as_str()) {
            return ResolutionTarget::Direct;
        }

        let Some(parsed) = JobScopedBlobName::parse(blob.as_str()) else {
            return ResolutionTarget::Unresolvable;
        };

        // DeviceRequest, PractitionerRole or a partition that merely contains
        // a category name are real job output
        if !self.synthesized_names.iter().any(|name| *name == parsed.category) {
            return ResolutionTarget::Direct;
        }

        match parsed.template_blob_name() {
            Ok(template) => {
                info!(blob = %blob, template = %template, "Remapping synthesized blob");
                ResolutionTarget::Template(template)
            }
            Err(_) => ResolutionTarget::Unresolvable,
        }
    }

    async fn fetch(&self, container: &ContainerName, blob: &BlobName) -> StorageResult<Bytes> {
        if !self.store.exists(container, blob).await? {
            return Err(StorageError::blob_not_found(container, blob));
        }

        self.store.download_content(container, blob).await
    }
}

#[async_trait]
impl ContentResolver for StorageResolver {
    async fn resolve(&self, container: &ContainerName, blob: &BlobName) -> StorageResult<Bytes> {
        match self.target_for(blob) {
            ResolutionTarget::Direct => self.fetch(container, blob).await,
            ResolutionTarget::Template(template) => {
                self.fetch(&self.template_container, &template).await
            }
            ResolutionTarget::Unresolvable => {
                Err(StorageError::blob_not_found(&self.template_container, blob))
            }
        }
    }
}

/// `.+(Name1|Name2|...).+` over the configured synthesized categories
fn synthesized_pattern(categories: &SynthesizedCategories) -> StorageResult<Option<Regex>> {
    if categories.is_empty() {
        return Ok(None);
    }

    let alternatives: Vec<String> = categories.names().map(regex::escape).collect();
    let pattern = format!(".+({}).+", alternatives.join("|"));

    Regex::new(&pattern)
        .map(Some)
        .map_err(|e| StorageError::ValidationError {
            message: format!("Invalid synthesized category pattern: {}", e),
        })
}
