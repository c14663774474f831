// Infrastructure error mapping
pub mod error;

// Storage implementations
pub mod apache_object_store_adapter;
pub mod backends;

// Re-export key types
pub use apache_object_store_adapter::ApacheObjectStoreAdapter;
pub use backends::{AzureConfig, S3Config, azure_builder, create_s3_store};
