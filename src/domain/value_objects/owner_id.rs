use super::ContainerName;
use crate::domain::errors::ValidationError;

/// Verified identifier of the tenant/owner making a request.
///
/// Produced upstream by the identity layer. It doubles as the name of the
/// owner's export container, so it must be a valid container name: an id the
/// transformer accepts is always one the file endpoint can serve.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId(ContainerName);

impl OwnerId {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        ContainerName::new(value.clone())
            .map(Self)
            .map_err(|e| ValidationError::InvalidOwnerId {
                value,
                reason: e.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The container holding this owner's export files
    pub fn container(&self) -> &ContainerName {
        &self.0
    }

    /// Whether `segment` (without slashes) names this owner's partition
    pub fn owns_segment(&self, segment: &str) -> bool {
        self.as_str() == segment
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_owner_ids() {
        assert!(OwnerId::new("cid123".to_string()).is_ok());
        assert!(OwnerId::new("7f1c5a4e-2b1d-4c3e-9a8f-0d6e5b4c3a21".to_string()).is_ok());
    }

    #[test]
    fn test_invalid_owner_ids() {
        assert!(matches!(
            OwnerId::new(String::new()),
            Err(ValidationError::InvalidOwnerId { .. })
        ));
        assert!(OwnerId::new("a/b".to_string()).is_err());
        assert!(OwnerId::new("has space".to_string()).is_err());
        assert!(OwnerId::new("x".repeat(64)).is_err());
    }

    #[test]
    fn test_owner_ids_follow_container_naming() {
        // Anything the file endpoint would refuse as a container is refused here
        for value in ["CID123", "cid_123", "c1", "cid--123"] {
            assert!(ContainerName::new(value.to_string()).is_err());
            assert_eq!(
                OwnerId::new(value.to_string()).unwrap_err(),
                ValidationError::InvalidOwnerId {
                    value: value.to_string(),
                    reason: ContainerName::new(value.to_string())
                        .unwrap_err()
                        .to_string(),
                }
            );
        }
    }

    #[test]
    fn test_owner_container() {
        let owner = OwnerId::new("cid123".to_string()).unwrap();
        assert_eq!(owner.container().as_str(), "cid123");
        assert!(owner.owns_segment("cid123"));
        assert!(!owner.owns_segment("cid1234"));
    }
}
