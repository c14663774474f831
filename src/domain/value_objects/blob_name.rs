use crate::domain::errors::ValidationError;

/// A validated blob name (path inside a container)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobName(String);

impl BlobName {
    /// Create a new BlobName with validation
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyBlobName);
        }

        if value.len() > 1024 {
            return Err(ValidationError::BlobNameTooLong {
                actual: value.len(),
                max: 1024,
            });
        }

        if let Some(c) = value.chars().find(|c| c.is_control()) {
            return Err(ValidationError::InvalidBlobNameCharacter(c));
        }

        if value.starts_with('/') {
            return Err(ValidationError::BlobNameStartsWithSlash);
        }

        if value.contains("//") {
            return Err(ValidationError::BlobNameContainsDoubleSlash);
        }

        if value.split('/').any(|segment| segment == "." || segment == "..") {
            return Err(ValidationError::BlobNameContainsTraversal);
        }

        Ok(Self(value))
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlobName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A blob name as handed out in a job manifest:
/// `<partition>/<category>-<jobSegment>.ndjson`
///
/// `partition` is everything before the last `/` and may span several
/// levels. `category` is one or more word characters. `jobSegment` is made of
/// digits and hyphens and starts and ends with a digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobScopedBlobName {
    pub partition: String,
    pub category: String,
    pub job_segment: String,
}

impl JobScopedBlobName {
    pub const EXTENSION: &'static str = ".ndjson";

    /// Parse a job-scoped blob name, returning `None` when it does not follow
    /// the grammar.
    pub fn parse(name: &str) -> Option<Self> {
        let (partition, file) = name.rsplit_once('/')?;
        if partition.is_empty() {
            return None;
        }

        let stem = file.strip_suffix(Self::EXTENSION)?;
        let (category, job_segment) = stem.split_once('-')?;

        if category.is_empty() || !category.chars().all(is_word_char) {
            return None;
        }

        if !is_job_segment(job_segment) {
            return None;
        }

        Some(Self {
            partition: partition.to_string(),
            category: category.to_string(),
            job_segment: job_segment.to_string(),
        })
    }

    /// Name of the pre-staged template file for this category
    pub fn template_blob_name(&self) -> Result<BlobName, ValidationError> {
        BlobName::new(format!("{}{}", self.category, Self::EXTENSION))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_job_segment(segment: &str) -> bool {
    let starts_with_digit = segment.chars().next().map_or(false, |c| c.is_ascii_digit());
    let ends_with_digit = segment.chars().last().map_or(false, |c| c.is_ascii_digit());

    starts_with_digit
        && ends_with_digit
        && segment.chars().all(|c| c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_blob_name() {
        assert!(BlobName::new("Patient-1-1.ndjson".to_string()).is_ok());
        assert!(BlobName::new("2024-01-01/Patient-1-1.ndjson".to_string()).is_ok());
    }

    #[test]
    fn test_invalid_blob_name() {
        assert!(BlobName::new("".to_string()).is_err());
        assert!(BlobName::new("/leading-slash".to_string()).is_err());
        assert!(BlobName::new("double//slash".to_string()).is_err());
        assert!(BlobName::new("null\0byte".to_string()).is_err());
        assert!(BlobName::new("../escape.ndjson".to_string()).is_err());
        assert!(BlobName::new("x".repeat(1025)).is_err());
    }

    #[test]
    fn test_parse_job_scoped_name() {
        let parsed = JobScopedBlobName::parse("2024-01-01/Practitioner-2024-01-01.ndjson").unwrap();
        assert_eq!(parsed.partition, "2024-01-01");
        assert_eq!(parsed.category, "Practitioner");
        assert_eq!(parsed.job_segment, "2024-01-01");
        assert_eq!(
            parsed.template_blob_name().unwrap().as_str(),
            "Practitioner.ndjson"
        );
    }

    #[test]
    fn test_parse_engine_style_name() {
        let parsed = JobScopedBlobName::parse("20240101T120000/Organization-1-1.ndjson").unwrap();
        assert_eq!(parsed.category, "Organization");
        assert_eq!(parsed.job_segment, "1-1");
    }

    #[test]
    fn test_parse_multi_level_partition() {
        let parsed = JobScopedBlobName::parse("jobs/2024-01-01/Device-3-1.ndjson").unwrap();
        assert_eq!(parsed.partition, "jobs/2024-01-01");
        assert_eq!(parsed.category, "Device");
    }

    #[test]
    fn test_parse_rejects_off_grammar_names() {
        assert!(JobScopedBlobName::parse("Practitioner-1-1.ndjson").is_none());
        assert!(JobScopedBlobName::parse("2024/Practitioner.ndjson").is_none());
        assert!(JobScopedBlobName::parse("2024/Practitioner-1-1.json").is_none());
        assert!(JobScopedBlobName::parse("2024/Practitioner-abc.ndjson").is_none());
        assert!(JobScopedBlobName::parse("2024/Practitioner-1-.ndjson").is_none());
        assert!(JobScopedBlobName::parse("2024/-1-1.ndjson").is_none());
    }
}
