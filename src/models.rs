use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownCategoryError;

/// One of the three ESG dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Environment,
    Social,
    Governance,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Environment, Category::Social, Category::Governance];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Environment => "environment",
            Category::Social => "social",
            Category::Governance => "governance",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "environment" => Ok(Category::Environment),
            "social" => Ok(Category::Social),
            "governance" => Ok(Category::Governance),
            _ => Err(UnknownCategoryError {
                name: s.to_string(),
            }),
        }
    }
}

/// Per-category keyword hit counts for one text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreVector {
    pub environment: u64,
    pub social: u64,
    pub governance: u64,
}

impl ScoreVector {
    /// Sum of the three counts. Always derived, never cached.
    pub fn total(&self) -> u64 {
        self.environment + self.social + self.governance
    }

    pub fn get(&self, category: Category) -> u64 {
        match category {
            Category::Environment => self.environment,
            Category::Social => self.social,
            Category::Governance => self.governance,
        }
    }

    pub fn largest(&self) -> u64 {
        self.environment.max(self.social).max(self.governance)
    }
}

/// Coarse sustainability rating, ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Low => write!(f, "Low"),
            Rating::Medium => write!(f, "Medium"),
            Rating::High => write!(f, "High"),
        }
    }
}

impl FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Rating::Low),
            "medium" => Ok(Rating::Medium),
            "high" => Ok(Rating::High),
            other => Err(format!("unknown rating '{}'", other)),
        }
    }
}

/// Result of scoring and classifying one text.
///
/// `confidence` is the dominance of the largest category over the total, not
/// a calibrated probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub scores: ScoreVector,
    pub total: u64,
    pub rating: Rating,
    pub confidence: f64,
}

/// A piece of text handed to the scorer by an ingestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub source: String,
    pub text: String,
}

/// A document together with its assessment, as rendered in reports.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredDocument {
    pub name: String,
    pub source: String,
    #[serde(flatten)]
    pub assessment: Assessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_sum_of_counts() {
        let v = ScoreVector {
            environment: 3,
            social: 4,
            governance: 5,
        };
        assert_eq!(v.total(), 12);
        assert_eq!(v.largest(), 5);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(" Social ".parse::<Category>(), Ok(Category::Social));
        let err = "economic".parse::<Category>().unwrap_err();
        assert_eq!(err.name, "economic");
    }

    #[test]
    fn test_rating_order() {
        assert!(Rating::Low < Rating::Medium);
        assert!(Rating::Medium < Rating::High);
        assert_eq!("HIGH".parse::<Rating>(), Ok(Rating::High));
    }
}
