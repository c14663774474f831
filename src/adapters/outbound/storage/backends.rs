//! Construction of the concrete object_store backends the proxy can read
//! export files from.

use object_store::{
    ObjectStore as ApacheObjectStore, aws::AmazonS3Builder, azure::MicrosoftAzureBuilder,
};
use std::sync::Arc;

use crate::domain::errors::StorageResult;

/// Configuration for the Azure Blob storage backend
#[derive(Debug, Clone)]
pub struct AzureConfig {
    pub account: String,
    pub access_key: Option<String>,
    pub use_emulator: bool,
}

/// Configuration for S3 storage backend
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub endpoint: Option<String>,
}

/// Azure builder without a container; one is set per request
pub fn azure_builder(config: &AzureConfig) -> MicrosoftAzureBuilder {
    let mut builder = MicrosoftAzureBuilder::new()
        .with_account(&config.account)
        .with_use_emulator(config.use_emulator);

    if let Some(access_key) = &config.access_key {
        builder = builder.with_access_key(access_key);
    }

    builder
}

/// Create an S3 store from configuration. Containers map to top-level
/// prefixes inside the bucket.
pub fn create_s3_store(config: &S3Config) -> StorageResult<Arc<dyn ApacheObjectStore>> {
    let mut builder = AmazonS3Builder::new()
        .with_bucket_name(&config.bucket)
        .with_region(&config.region);

    if let Some(access_key) = &config.access_key {
        builder = builder.with_access_key_id(access_key);
    }

    if let Some(secret_key) = &config.secret_key {
        builder = builder.with_secret_access_key(secret_key);
    }

    if let Some(endpoint) = &config.endpoint {
        builder = builder.with_endpoint(endpoint);
    }

    Ok(Arc::new(builder.build()?))
}
