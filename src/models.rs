use serde::Serialize;
use std::fmt;

/// Placeholder for a field that could not be matched on the listing page.
pub const NOT_AVAILABLE: &str = "Not Available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLink {
    pub name: String,
    pub url: String,
}

impl CategoryLink {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryLink {
    pub name: String,
    pub url: String,
    pub parent_category: String,
}

impl SubcategoryLink {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        parent_category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            parent_category: parent_category.into(),
        }
    }
}

/// One exported row. Field order is the column order of the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Subcategory")]
    pub subcategory: String,
    #[serde(rename = "Job Title")]
    pub title: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Salary")]
    pub salary: String,
    #[serde(rename = "Job URL")]
    pub url: String,
}

impl JobRecord {
    pub const COLUMNS: [&'static str; 6] = [
        "Category",
        "Subcategory",
        "Job Title",
        "Company",
        "Salary",
        "Job URL",
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureEntry {
    Category { category: String },
    Branch { category: String, subcategory: String },
}

impl fmt::Display for FailureEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category { category } => write!(f, "{}", category),
            Self::Branch {
                category,
                subcategory,
            } => write!(f, "{} → {}", category, subcategory),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CrawlResult {
    pub records: Vec<JobRecord>,
    pub failures: Vec<FailureEntry>,
}

impl CrawlResult {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_entry_display() {
        let category = FailureEntry::Category {
            category: "IT".to_string(),
        };
        let branch = FailureEntry::Branch {
            category: "IT".to_string(),
            subcategory: "Java".to_string(),
        };

        assert_eq!(category.to_string(), "IT");
        assert_eq!(branch.to_string(), "IT → Java");
    }

    #[test]
    fn default_result_is_empty() {
        assert!(CrawlResult::default().is_empty());
    }
}
