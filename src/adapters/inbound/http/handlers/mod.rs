pub mod content_handlers;
pub mod export_handlers;

pub use content_handlers::*;
pub use export_handlers::*;
