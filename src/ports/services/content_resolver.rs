use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{
    errors::StorageResult,
    value_objects::{BlobName, ContainerName},
};

/// Port for serving the bytes behind a (possibly synthesized) export URL
#[async_trait]
pub trait ContentResolver: Send + Sync + 'static {
    /// Resolve a blob, applying any redirection rules, and return its content
    async fn resolve(&self, container: &ContainerName, blob: &BlobName) -> StorageResult<Bytes>;
}
