mod export_status;

pub use export_status::{ExportStatusSource, UpstreamResponse};
