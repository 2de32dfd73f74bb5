//! ESG keyword scoring and rating.
//!
//! - [`keywords`] — the immutable category → keyword mapping.
//! - [`scorer`] — turns raw text into a [`ScoreVector`](crate::models::ScoreVector).
//! - [`classifier`] — maps a total to a [`Rating`](crate::models::Rating) and
//!   exposes [`score_and_classify`](classifier::score_and_classify).
//! - [`confidence`] — category dominance ratio attached to every assessment.

pub mod classifier;
pub mod confidence;
pub mod keywords;
pub mod scorer;
