pub mod http_export_status_source;

pub use http_export_status_source::HttpExportStatusSource;
