//! Points for one product entry
//!
//! The same weight is awarded for a correct answer and deducted for a wrong
//! one. Weight grows with the number of terms in the dot product, with the
//! magnitude of the answer and with the configured value range, the last two
//! on a logarithmic scale.

/// `floor(ln(x))`, or `None` where the logarithm is undefined or infinite
fn floor_ln(x: f64) -> Option<i64> {
    if x <= 0.0 {
        return None;
    }
    Some(x.ln().floor() as i64)
}

/// Difficulty multiplier from the value range: `max(1, floor(ln(max - min)))`
pub fn value_range_factor(min_value: i32, max_value: i32) -> i64 {
    let spread = i64::from(max_value) - i64::from(min_value);
    floor_ln(spread as f64).map_or(1, |f| f.max(1))
}

/// Magnitude term of an answer: `max(2, floor(ln(|answer|)))`.
///
/// Zero has no logarithm and scores like any small answer.
pub fn magnitude_factor(answer: i64) -> i64 {
    floor_ln(answer.unsigned_abs() as f64).map_or(2, |f| f.max(2))
}

/// Score weight of an entry whose correct value is `answer`
pub fn score_weight(answer: i64, columns_left: usize, min_value: i32, max_value: i32) -> i64 {
    value_range_factor(min_value, max_value)
        .saturating_mul(columns_left as i64)
        .saturating_mul(magnitude_factor(answer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range_factor() {
        // ln(20) ~ 3.0 -> 2
        assert_eq!(value_range_factor(-10, 10), 2);
        // ln(2) ~ 0.69 -> 0 -> clamped to 1
        assert_eq!(value_range_factor(0, 2), 1);
        // Degenerate range
        assert_eq!(value_range_factor(5, 5), 1);
        // ln(1000) ~ 6.9 -> 6
        assert_eq!(value_range_factor(0, 1000), 6);
    }

    #[test]
    fn test_magnitude_factor() {
        assert_eq!(magnitude_factor(1), 2);
        assert_eq!(magnitude_factor(19), 2);
        // ln(50) ~ 3.9
        assert_eq!(magnitude_factor(50), 3);
        assert_eq!(magnitude_factor(100_000), 11);
    }

    #[test]
    fn test_zero_and_negative_answers() {
        // ln(0) is undefined: lowest magnitude term
        assert_eq!(magnitude_factor(0), 2);
        // Negative answers use their magnitude
        assert_eq!(magnitude_factor(-50), magnitude_factor(50));
        assert_eq!(magnitude_factor(i64::MIN), magnitude_factor(i64::MAX));
    }

    #[test]
    fn test_score_weight() {
        assert_eq!(score_weight(19, 2, -10, 10), 8);
        assert_eq!(score_weight(50, 2, -10, 10), 12);
        assert_eq!(score_weight(0, 3, -10, 10), 12);
        assert_eq!(score_weight(-50, 1, 0, 1), 3);
    }

    #[test]
    fn test_weight_grows_with_terms() {
        let one = score_weight(42, 1, -10, 10);
        let three = score_weight(42, 3, -10, 10);
        assert_eq!(three, 3 * one);
    }
}
