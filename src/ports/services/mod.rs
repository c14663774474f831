pub mod content_resolver;
pub mod output_filter;

pub use content_resolver::ContentResolver;
pub use output_filter::OutputFilter;
