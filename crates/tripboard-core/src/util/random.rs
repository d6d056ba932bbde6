// ── Random value helpers ──
//
// Used by the demo data source to invent plausible trips.

use rand::Rng;
use rand::seq::SliceRandom;

/// Uniform integer in `min..=max`. Reversed bounds are swapped.
pub fn get_random_integer(min: i64, max: i64) -> i64 {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    rand::thread_rng().gen_range(low..=high)
}

/// Uniform float rounded to `digits` decimals.
///
/// The range is normalized through absolute values first, so
/// `(-5.0, 2.0)` draws from `2.0..5.0`, not `-5.0..2.0`.
pub fn get_random_number(min: f64, max: f64, digits: u8) -> f64 {
    let lower = min.abs().min(max.abs());
    let upper = min.abs().max(max.abs());
    let raw = rand::thread_rng().gen_range(0.0..=1.0) * (upper - lower) + lower;
    let scale = 10_f64.powi(i32::from(digits));
    (raw * scale).round() / scale
}

/// Between zero and `items.len()` distinct elements in random order.
/// The input is left untouched.
pub fn get_random_elements<T: Clone>(items: &[T]) -> Vec<T> {
    #[allow(clippy::cast_precision_loss)]
    let upper = items.len() as f64;
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::as_conversions
    )]
    let count = (get_random_number(0.0, upper, 0) as usize).min(items.len());
    items
        .choose_multiple(&mut rand::thread_rng(), count)
        .cloned()
        .collect()
}

/// One uniformly chosen element, or `None` for an empty slice.
pub fn get_random_element<T>(items: &[T]) -> Option<&T> {
    items.choose(&mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn degenerate_integer_range_is_constant() {
        for _ in 0..50 {
            assert_eq!(get_random_integer(5, 5), 5);
        }
    }

    #[test]
    fn integer_stays_inside_bounds() {
        for _ in 0..200 {
            let n = get_random_integer(-3, 3);
            assert!((-3..=3).contains(&n));
        }
        for _ in 0..50 {
            assert!((1..=4).contains(&get_random_integer(4, 1)));
        }
    }

    #[test]
    fn zero_digits_yields_whole_numbers() {
        for _ in 0..200 {
            let n = get_random_number(0.0, 10.0, 0);
            assert!((0.0..=10.0).contains(&n));
            assert!((n - n.round()).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn mixed_signs_are_normalized_through_abs() {
        for _ in 0..200 {
            let n = get_random_number(-5.0, 2.0, 1);
            assert!((2.0..=5.0).contains(&n));
        }
    }

    #[test]
    fn random_elements_are_distinct_and_leave_input_alone() {
        let items: Vec<u32> = (0..10).collect();
        for _ in 0..50 {
            let picked = get_random_elements(&items);
            assert!(picked.len() <= items.len());
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), picked.len());
            assert!(picked.iter().all(|n| items.contains(n)));
        }
        assert_eq!(items, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn random_element_of_empty_is_none() {
        let empty: [u8; 0] = [];
        assert!(get_random_element(&empty).is_none());
        assert_eq!(get_random_element(&[7]), Some(&7));
    }
}
