pub mod owner_identity;

pub use owner_identity::{DEFAULT_OWNER_HEADER, OwnerIdentityLayer, OwnerIdentityService, VerifiedOwner};
