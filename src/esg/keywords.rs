use std::collections::{BTreeMap, HashSet};

use crate::error::{KeywordIndexError, UnknownCategoryError};
use crate::models::Category;

const ENVIRONMENT: &[&str] = &["carbon", "emission", "renewable", "energy", "waste", "climate"];
const SOCIAL: &[&str] = &["job", "community", "health", "education", "safety"];
const GOVERNANCE: &[&str] = &["ethics", "compliance", "transparency", "policy", "audit"];

/// Built-in keyword list for a category.
pub fn canonical_keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::Environment => ENVIRONMENT,
        Category::Social => SOCIAL,
        Category::Governance => GOVERNANCE,
    }
}

/// Category → keyword list mapping, validated once and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordIndex {
    environment: Vec<String>,
    social: Vec<String>,
    governance: Vec<String>,
}

impl KeywordIndex {
    /// Build an index from explicit lists.
    ///
    /// Every list must be non-empty, every keyword non-empty and lowercase, and
    /// no keyword may repeat within a category.
    pub fn new(
        environment: Vec<String>,
        social: Vec<String>,
        governance: Vec<String>,
    ) -> Result<Self, KeywordIndexError> {
        validate(Category::Environment, &environment)?;
        validate(Category::Social, &social)?;
        validate(Category::Governance, &governance)?;
        Ok(Self {
            environment,
            social,
            governance,
        })
    }

    /// Start from the canonical lists and replace the categories present in
    /// `overrides`.
    pub fn with_overrides(
        overrides: &BTreeMap<Category, Vec<String>>,
    ) -> Result<Self, KeywordIndexError> {
        let pick = |category: Category| -> Vec<String> {
            overrides.get(&category).cloned().unwrap_or_else(|| {
                canonical_keywords(category)
                    .iter()
                    .map(|k| k.to_string())
                    .collect()
            })
        };
        Self::new(
            pick(Category::Environment),
            pick(Category::Social),
            pick(Category::Governance),
        )
    }

    pub fn keywords(&self, category: Category) -> &[String] {
        match category {
            Category::Environment => &self.environment,
            Category::Social => &self.social,
            Category::Governance => &self.governance,
        }
    }

    /// Look up a category by name.
    pub fn keywords_for(&self, name: &str) -> Result<&[String], UnknownCategoryError> {
        let category: Category = name.parse()?;
        Ok(self.keywords(category))
    }
}

impl Default for KeywordIndex {
    /// The canonical keyword lists.
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            environment: owned(ENVIRONMENT),
            social: owned(SOCIAL),
            governance: owned(GOVERNANCE),
        }
    }
}

fn validate(category: Category, keywords: &[String]) -> Result<(), KeywordIndexError> {
    if keywords.is_empty() {
        return Err(KeywordIndexError::EmptyCategory(category));
    }

    let mut seen = HashSet::new();
    for keyword in keywords {
        if keyword.is_empty() {
            return Err(KeywordIndexError::EmptyKeyword(category));
        }
        if keyword.to_lowercase() != *keyword {
            return Err(KeywordIndexError::NotLowercase {
                category,
                keyword: keyword.clone(),
            });
        }
        if !seen.insert(keyword.as_str()) {
            return Err(KeywordIndexError::Duplicate {
                category,
                keyword: keyword.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_default_matches_canonical() {
        let index = KeywordIndex::default();
        for category in Category::ALL {
            assert_eq!(index.keywords(category), words(canonical_keywords(category)));
        }
    }

    #[test]
    fn test_keywords_for_known_name() {
        let index = KeywordIndex::default();
        let social = index.keywords_for("social").unwrap();
        assert!(social.iter().any(|k| k == "job"));
    }

    #[test]
    fn test_keywords_for_unknown_name() {
        let index = KeywordIndex::default();
        let err = index.keywords_for("economic").unwrap_err();
        assert_eq!(err.name, "economic");
    }

    #[test]
    fn test_rejects_empty_list() {
        let err = KeywordIndex::new(vec![], words(&["job"]), words(&["audit"])).unwrap_err();
        assert_eq!(err, KeywordIndexError::EmptyCategory(Category::Environment));
    }

    #[test]
    fn test_rejects_uppercase_keyword() {
        let err =
            KeywordIndex::new(words(&["Carbon"]), words(&["job"]), words(&["audit"])).unwrap_err();
        assert!(matches!(err, KeywordIndexError::NotLowercase { .. }));
    }

    #[test]
    fn test_rejects_duplicate_within_category() {
        let err = KeywordIndex::new(words(&["carbon"]), words(&["job", "job"]), words(&["audit"]))
            .unwrap_err();
        assert_eq!(
            err,
            KeywordIndexError::Duplicate {
                category: Category::Social,
                keyword: "job".to_string()
            }
        );
    }

    #[test]
    fn test_allows_duplicate_across_categories() {
        let index = KeywordIndex::new(
            words(&["safety"]),
            words(&["safety"]),
            words(&["audit"]),
        );
        assert!(index.is_ok());
    }

    #[test]
    fn test_overrides_replace_single_category() {
        let mut overrides = BTreeMap::new();
        overrides.insert(Category::Governance, words(&["board", "oversight"]));
        let index = KeywordIndex::with_overrides(&overrides).unwrap();
        assert_eq!(index.keywords(Category::Governance), words(&["board", "oversight"]));
        assert_eq!(index.keywords(Category::Environment), words(ENVIRONMENT));
    }
}
