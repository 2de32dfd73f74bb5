use crate::models::ScoreVector;

/// Returned when no keyword matched at all.
pub const NO_SIGNAL_CONFIDENCE: f64 = 0.1;

/// Share of the total held by the largest category, in `[0, 1]`.
///
/// This measures how one-sided the keyword hits are. A text that only talks
/// about carbon gets 1.0 even though its rating may be Low; it says nothing
/// about how certain the rating is.
pub fn dominance(scores: &ScoreVector) -> f64 {
    let total = scores.total();
    if total == 0 {
        return NO_SIGNAL_CONFIDENCE;
    }
    (scores.largest() as f64 / total as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_signal() {
        assert_eq!(dominance(&ScoreVector::default()), NO_SIGNAL_CONFIDENCE);
    }

    #[test]
    fn test_single_category() {
        let v = ScoreVector {
            environment: 3,
            social: 0,
            governance: 0,
        };
        assert_eq!(dominance(&v), 1.0);
    }

    #[test]
    fn test_balanced() {
        let v = ScoreVector {
            environment: 2,
            social: 1,
            governance: 1,
        };
        assert!((dominance(&v) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lower_bound_is_one_third() {
        let v = ScoreVector {
            environment: 7,
            social: 7,
            governance: 7,
        };
        assert!((dominance(&v) - 1.0 / 3.0).abs() < 1e-12);
    }
}
