/// Validation errors for domain value objects
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // OwnerId validation errors
    InvalidOwnerId {
        value: String,
        reason: String,
    },

    // ContainerName validation errors
    ContainerNameTooShort {
        actual: usize,
        min: usize,
    },
    ContainerNameTooLong {
        actual: usize,
        max: usize,
    },
    ContainerNameInvalidStart,
    ContainerNameInvalidEnd,
    ContainerNameInvalidCharacter(char),
    ContainerNameConsecutiveHyphens,

    // BlobName validation errors
    EmptyBlobName,
    BlobNameTooLong {
        actual: usize,
        max: usize,
    },
    InvalidBlobNameCharacter(char),
    BlobNameStartsWithSlash,
    BlobNameContainsDoubleSlash,
    BlobNameContainsTraversal,

    // Synthesized category configuration errors
    EmptyCategoryName,
    InvalidCategoryName(String),
    DuplicateCategory(String),
    InvalidField {
        field: String,
        value: String,
        expected: String,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // OwnerId errors
            ValidationError::InvalidOwnerId { value, reason } => {
                write!(
                    f,
                    "Owner id '{}' is not a valid container name: {}",
                    value, reason
                )
            }

            // ContainerName errors
            ValidationError::ContainerNameTooShort { actual, min } => {
                write!(
                    f,
                    "Container name too short: {} characters (min: {})",
                    actual, min
                )
            }
            ValidationError::ContainerNameTooLong { actual, max } => {
                write!(
                    f,
                    "Container name too long: {} characters (max: {})",
                    actual, max
                )
            }
            ValidationError::ContainerNameInvalidStart => {
                write!(f, "Container name must start with lowercase letter or number")
            }
            ValidationError::ContainerNameInvalidEnd => {
                write!(f, "Container name must end with lowercase letter or number")
            }
            ValidationError::ContainerNameInvalidCharacter(c) => {
                write!(
                    f,
                    "Invalid character in container name: '{}'. Only lowercase letters, numbers, and hyphens allowed",
                    c
                )
            }
            ValidationError::ContainerNameConsecutiveHyphens => {
                write!(f, "Container name cannot contain consecutive hyphens")
            }

            // BlobName errors
            ValidationError::EmptyBlobName => write!(f, "Blob name cannot be empty"),
            ValidationError::BlobNameTooLong { actual, max } => {
                write!(f, "Blob name too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::InvalidBlobNameCharacter(c) => {
                write!(f, "Invalid character in blob name: {:?}", c)
            }
            ValidationError::BlobNameStartsWithSlash => {
                write!(f, "Blob name cannot start with '/'")
            }
            ValidationError::BlobNameContainsDoubleSlash => {
                write!(f, "Blob name cannot contain '//'")
            }
            ValidationError::BlobNameContainsTraversal => {
                write!(f, "Blob name cannot contain '.' or '..' segments")
            }

            // Category errors
            ValidationError::EmptyCategoryName => write!(f, "Category name cannot be empty"),
            ValidationError::InvalidCategoryName(name) => {
                write!(
                    f,
                    "Invalid category name '{}': only ASCII letters, digits and '_' allowed",
                    name
                )
            }
            ValidationError::DuplicateCategory(name) => {
                write!(f, "Duplicate synthesized category: {}", name)
            }
            ValidationError::InvalidField {
                field,
                value,
                expected,
            } => {
                write!(
                    f,
                    "Invalid value for field '{}': '{}' (expected: {})",
                    field, value, expected
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
