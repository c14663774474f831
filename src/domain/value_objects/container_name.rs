use crate::domain::errors::ValidationError;

/// Name of a blob container.
///
/// Each owner's export files live in a container named after the owner id,
/// and synthesized categories come from one shared template container. Both
/// follow Azure Blob naming: 3 to 63 characters of lowercase ASCII letters,
/// digits and single hyphens, with a letter or digit at either end.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerName(String);

impl ContainerName {
    const MIN_LEN: usize = 3;
    const MAX_LEN: usize = 63;

    pub fn new(value: String) -> Result<Self, ValidationError> {
        match value.len() {
            len if len < Self::MIN_LEN => {
                return Err(ValidationError::ContainerNameTooShort {
                    actual: len,
                    min: Self::MIN_LEN,
                });
            }
            len if len > Self::MAX_LEN => {
                return Err(ValidationError::ContainerNameTooLong {
                    actual: len,
                    max: Self::MAX_LEN,
                });
            }
            _ => {}
        }

        if let Some(c) = value.chars().find(|c| !is_name_char(*c)) {
            return Err(ValidationError::ContainerNameInvalidCharacter(c));
        }

        if value.starts_with('-') {
            return Err(ValidationError::ContainerNameInvalidStart);
        }
        if value.ends_with('-') {
            return Err(ValidationError::ContainerNameInvalidEnd);
        }
        if value.contains("--") {
            return Err(ValidationError::ContainerNameConsecutiveHyphens);
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
}

impl std::fmt::Display for ContainerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(value: &str) -> Result<ContainerName, ValidationError> {
        ContainerName::new(value.to_string())
    }

    #[test]
    fn test_owner_and_template_containers() {
        assert!(name("export").is_ok());
        assert!(name("cid123").is_ok());
        assert!(name("7f1c5a4e-2b1d-4c3e-9a8f-0d6e5b4c3a21").is_ok());
        assert!(name(&"a".repeat(63)).is_ok());
    }

    #[test]
    fn test_rejected_names() {
        assert_eq!(
            name("ab"),
            Err(ValidationError::ContainerNameTooShort { actual: 2, min: 3 })
        );
        assert!(name(&"a".repeat(64)).is_err());
        assert_eq!(name("-export"), Err(ValidationError::ContainerNameInvalidStart));
        assert_eq!(name("export-"), Err(ValidationError::ContainerNameInvalidEnd));
        assert_eq!(
            name("Export"),
            Err(ValidationError::ContainerNameInvalidCharacter('E'))
        );
        assert!(name("my_container").is_err());
        assert!(name("my.container").is_err());
        assert_eq!(
            name("my--container"),
            Err(ValidationError::ContainerNameConsecutiveHyphens)
        );
    }
}
