pub mod export_completion_transformer;
pub mod storage_resolver;

pub use export_completion_transformer::{ExportCompletionTransformer, VerifiedEntry};
pub use storage_resolver::{ResolutionTarget, StorageResolver};
