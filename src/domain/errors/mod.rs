mod filter_errors;
mod storage_errors;
mod upstream_errors;
mod validation_errors;

pub use filter_errors::*;
pub use storage_errors::*;
pub use upstream_errors::*;
pub use validation_errors::*;
