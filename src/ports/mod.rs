pub mod services;
pub mod storage;
pub mod upstream;

// Re-export all port traits for convenience
pub use services::{ContentResolver, OutputFilter};
pub use storage::BlobStore;
pub use upstream::{ExportStatusSource, UpstreamResponse};
