use crate::domain::{errors::FilterResult, models::RequestContext};

/// A post-processing stage applied to an upstream response before it
/// reaches the client.
pub trait OutputFilter: Send + Sync + 'static {
    /// Human readable filter name, reported in structured errors
    fn name(&self) -> &str;

    /// Stable identifier of this filter instance
    fn id(&self) -> &str;

    /// Run the filter. Contexts the filter does not apply to are returned
    /// unchanged.
    fn execute(&self, context: RequestContext) -> FilterResult<RequestContext>;
}
