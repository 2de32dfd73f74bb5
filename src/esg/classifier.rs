use crate::esg::confidence::dominance;
use crate::esg::keywords::KeywordIndex;
use crate::esg::scorer::score;
use crate::models::{Assessment, Rating, ScoreVector};

/// Totals at or above this are at least Medium.
pub const MEDIUM_THRESHOLD: u64 = 200;
/// Totals at or above this are High.
pub const HIGH_THRESHOLD: u64 = 600;

/// Map a keyword total to a rating.
pub fn classify(total: u64) -> Rating {
    if total < MEDIUM_THRESHOLD {
        Rating::Low
    } else if total < HIGH_THRESHOLD {
        Rating::Medium
    } else {
        Rating::High
    }
}

/// Score `text`, rate it, and attach the dominance ratio.
pub fn score_and_classify(index: &KeywordIndex, text: &str) -> Assessment {
    assess(score(index, text))
}

/// Build an [`Assessment`] from an already computed vector.
pub fn assess(scores: ScoreVector) -> Assessment {
    let total = scores.total();
    Assessment {
        scores,
        total,
        rating: classify(total),
        confidence: dominance(&scores),
    }
}
