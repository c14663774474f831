use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{
    errors::StorageResult,
    value_objects::{BlobName, ContainerName},
};

/// Port for blob storage operations
/// This abstracts the actual storage backend (Azure Blob, S3, in-memory)
#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    /// Check if a blob exists in a container
    async fn exists(&self, container: &ContainerName, blob: &BlobName) -> StorageResult<bool>;

    /// Download the full content of a blob
    async fn download_content(
        &self,
        container: &ContainerName,
        blob: &BlobName,
    ) -> StorageResult<Bytes>;
}
