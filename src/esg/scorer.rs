use crate::esg::keywords::KeywordIndex;
use crate::models::{Category, ScoreVector};

/// Count keyword hits per category.
///
/// Matching is plain substring search over the lower-cased text, so a keyword
/// also hits inside longer words ("job" in "jobseeker"). This inflates counts
/// and is kept only so scores stay comparable with existing datasets.
pub fn score(index: &KeywordIndex, text: &str) -> ScoreVector {
    let lower = text.to_lowercase();
    ScoreVector {
        environment: category_count(index, Category::Environment, &lower),
        social: category_count(index, Category::Social, &lower),
        governance: category_count(index, Category::Governance, &lower),
    }
}

fn category_count(index: &KeywordIndex, category: Category, lower: &str) -> u64 {
    index
        .keywords(category)
        .iter()
        .map(|keyword| count_occurrences(lower, keyword))
        .sum()
}

/// Non-overlapping occurrences of `needle`, scanning left to right.
fn count_occurrences(haystack: &str, needle: &str) -> u64 {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count() as u64
}
