//! Answer alternatives for the highlighted entry

use rand::Rng;

use crate::consts::MAX_ERROR_RETRIES;

/// Make `count` alternatives around `correct`, exactly one slot of which is
/// overwritten with `correct`.
///
/// Each wrong alternative is `correct + error` with `error` drawn from
/// `[-max_error, max_error]`. Zero and errors already used in this batch are
/// redrawn, at most `MAX_ERROR_RETRIES` times; after that the last draw is
/// kept, so a tiny `max_error` can still yield duplicates.
pub fn generate_alternatives<R: Rng + ?Sized>(
    rng: &mut R,
    correct: i64,
    count: usize,
    max_error: i32,
) -> Vec<i64> {
    if count == 0 {
        return Vec::new();
    }
    let max_error = i64::from(max_error.max(0));

    let mut errors: Vec<i64> = Vec::with_capacity(count);
    for _ in 0..count {
        let mut error = 0;
        let mut tries = 0;
        while (error == 0 || errors.contains(&error)) && tries < MAX_ERROR_RETRIES {
            error = rng.random_range(-max_error..=max_error);
            tries += 1;
        }
        errors.push(error);
    }

    let mut alternatives: Vec<i64> = errors.iter().map(|e| correct.saturating_add(*e)).collect();
    let slot = rng.random_range(0..count);
    alternatives[slot] = correct;
    alternatives
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_three_alternatives_around_42() {
        for seed in 0..200 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let alternatives = generate_alternatives(&mut rng, 42, 3, 10);

            assert_eq!(alternatives.len(), 3);
            assert_eq!(alternatives.iter().filter(|a| **a == 42).count(), 1);
            assert!(alternatives.iter().all(|a| (32..=52).contains(a)));
        }
    }

    #[test]
    fn test_correct_slot_is_spread() {
        let mut seen = [false; 4];
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..200 {
            let alternatives = generate_alternatives(&mut rng, 0, 4, 20);
            let slot = alternatives.iter().position(|a| *a == 0).unwrap();
            seen[slot] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_zero_error_degenerates_to_correct() {
        let mut rng = Pcg32::seed_from_u64(3);
        // Retries run out; every slot ends up with the correct value
        assert_eq!(generate_alternatives(&mut rng, 7, 3, 0), vec![7, 7, 7]);
    }

    #[test]
    fn test_more_slots_than_errors() {
        let mut rng = Pcg32::seed_from_u64(5);
        // Only -1 and 1 exist; the rest are duplicates or the correct value
        let alternatives = generate_alternatives(&mut rng, 10, 6, 1);
        assert_eq!(alternatives.len(), 6);
        assert!(alternatives.contains(&10));
        assert!(alternatives.iter().all(|a| (9..=11).contains(a)));
    }

    #[test]
    fn test_no_slots() {
        let mut rng = Pcg32::seed_from_u64(0);
        assert!(generate_alternatives(&mut rng, 1, 0, 10).is_empty());
    }

    proptest! {
        #[test]
        fn prop_alternatives_bounded(
            seed in any::<u64>(),
            correct in -10_000i64..10_000,
            count in 1usize..12,
            max_error in 0i32..50,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let alternatives = generate_alternatives(&mut rng, correct, count, max_error);

            prop_assert_eq!(alternatives.len(), count);
            prop_assert!(alternatives.contains(&correct));
            let max_error = i64::from(max_error);
            prop_assert!(alternatives.iter().all(|a| (a - correct).abs() <= max_error));
        }

        #[test]
        fn prop_single_correct_with_room(
            seed in any::<u64>(),
            correct in -10_000i64..10_000,
            count in 1usize..6,
        ) {
            // Plenty of distinct errors: retries essentially never run out
            let max_error = 50;
            let mut rng = Pcg32::seed_from_u64(seed);
            let alternatives = generate_alternatives(&mut rng, correct, count, max_error);

            prop_assert_eq!(alternatives.iter().filter(|a| **a == correct).count(), 1);
        }
    }
}
