pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    BlobName,
    ContainerName,
    DomainValidationError,
    // Models
    ExportManifest,
    // Errors
    FilterError,
    FilterErrorKind,
    JobScopedBlobName,
    OutputEntry,
    // Value objects
    OwnerId,
    PipelineType,
    ProxyEndpoint,
    RequestContext,
    StorageError,
    SynthesizedCategories,
    SynthesizedCategory,
    UpstreamError,
};

// Port types - interfaces for external systems
pub use ports::{BlobStore, ContentResolver, ExportStatusSource, OutputFilter, UpstreamResponse};

// Service implementations - business logic
pub use services::{ExportCompletionTransformer, ResolutionTarget, StorageResolver};

// Application factory and configuration
pub use app::{AppBuilder, AppConfig, AppError, AppServices, StorageBackend, create_in_memory_app};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{storage::ApacheObjectStoreAdapter, upstream::HttpExportStatusSource};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        ApacheObjectStoreAdapter, AppBuilder, AppServices, BlobStore, ContentResolver,
        ExportCompletionTransformer, ExportStatusSource, OutputFilter, OwnerId, StorageResolver,
        create_in_memory_app,
    };
}
