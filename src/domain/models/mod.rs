pub mod context;
pub mod manifest;
pub mod proxy;
pub mod synthesized;

pub use context::{PipelineType, RequestContext};
pub use manifest::{ExportManifest, OutputEntry};
pub use proxy::{EXPORT_PATH_SEGMENT, ProxyEndpoint};
pub use synthesized::{DEFAULT_TEMPLATE_CATEGORY, SynthesizedCategories, SynthesizedCategory};
