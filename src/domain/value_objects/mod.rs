pub mod blob_name;
pub mod container_name;
pub mod owner_id;

pub use blob_name::{BlobName, JobScopedBlobName};
pub use container_name::ContainerName;
pub use owner_id::OwnerId;
