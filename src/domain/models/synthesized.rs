use crate::domain::errors::ValidationError;

/// Category used as the URL pattern source when nothing else is configured
pub const DEFAULT_TEMPLATE_CATEGORY: &str = "AllergyIntolerance";

/// A resource category the export engine does not produce but that is added
/// to every completed manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedCategory {
    pub name: String,
    pub count: u64,
}

impl SynthesizedCategory {
    pub fn new(name: impl Into<String>, count: u64) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_category_name(&name)?;
        Ok(Self { name, count })
    }
}

/// Ordered, read-only table of synthesized categories plus the template
/// category their URLs derive from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedCategories {
    template_category: String,
    categories: Vec<SynthesizedCategory>,
}

impl SynthesizedCategories {
    pub fn new(
        template_category: impl Into<String>,
        categories: Vec<SynthesizedCategory>,
    ) -> Result<Self, ValidationError> {
        let template_category = template_category.into();
        validate_category_name(&template_category)?;

        for (idx, category) in categories.iter().enumerate() {
            if category.name == template_category
                || categories[..idx].iter().any(|c| c.name == category.name)
            {
                return Err(ValidationError::DuplicateCategory(category.name.clone()));
            }
        }

        Ok(Self {
            template_category,
            categories,
        })
    }

    /// Parse a `Name:count,Name:count` list, keeping the given order
    pub fn parse(template_category: &str, table: &str) -> Result<Self, ValidationError> {
        let mut categories = Vec::new();

        for item in table.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (name, count) =
                item.split_once(':')
                    .ok_or_else(|| ValidationError::InvalidField {
                        field: "synthesized_categories".to_string(),
                        value: item.to_string(),
                        expected: "Name:count".to_string(),
                    })?;

            let count = count
                .trim()
                .parse::<u64>()
                .map_err(|_| ValidationError::InvalidField {
                    field: "synthesized_categories".to_string(),
                    value: item.to_string(),
                    expected: "a non-negative integer count".to_string(),
                })?;

            categories.push(SynthesizedCategory::new(name.trim(), count)?);
        }

        Self::new(template_category, categories)
    }

    pub fn template_category(&self) -> &str {
        &self.template_category
    }

    pub fn categories(&self) -> &[SynthesizedCategory] {
        &self.categories
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for SynthesizedCategories {
    /// Practitioner (6), Device (3), Organization (6) from AllergyIntolerance
    fn default() -> Self {
        Self {
            template_category: DEFAULT_TEMPLATE_CATEGORY.to_string(),
            categories: vec![
                SynthesizedCategory {
                    name: "Practitioner".to_string(),
                    count: 6,
                },
                SynthesizedCategory {
                    name: "Device".to_string(),
                    count: 3,
                },
                SynthesizedCategory {
                    name: "Organization".to_string(),
                    count: 6,
                },
            ],
        }
    }
}

fn validate_category_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyCategoryName);
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::InvalidCategoryName(name.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = SynthesizedCategories::default();
        assert_eq!(table.template_category(), "AllergyIntolerance");
        assert_eq!(
            table.names().collect::<Vec<_>>(),
            vec!["Practitioner", "Device", "Organization"]
        );
        let counts: Vec<u64> = table.categories().iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![6, 3, 6]);
    }

    #[test]
    fn test_parse_matches_default() {
        let parsed = SynthesizedCategories::parse(
            "AllergyIntolerance",
            "Practitioner:6, Device:3, Organization:6",
        )
        .unwrap();
        assert_eq!(parsed, SynthesizedCategories::default());
    }

    #[test]
    fn test_parse_rejects_bad_entries() {
        assert!(SynthesizedCategories::parse("AllergyIntolerance", "Practitioner").is_err());
        assert!(SynthesizedCategories::parse("AllergyIntolerance", "Practitioner:x").is_err());
        assert!(SynthesizedCategories::parse("AllergyIntolerance", "Bad Name:1").is_err());
        assert_eq!(
            SynthesizedCategories::parse("AllergyIntolerance", "Device:1,Device:2"),
            Err(ValidationError::DuplicateCategory("Device".to_string()))
        );
        assert!(SynthesizedCategories::parse("Device", "Device:1").is_err());
    }

    #[test]
    fn test_parse_empty_list() {
        let parsed = SynthesizedCategories::parse("AllergyIntolerance", "").unwrap();
        assert!(parsed.is_empty());
    }
}
