//! Even distribution of a task budget across checklist items.

/// Smallest unit of hours handed to a single item.
pub const HALF_HOUR: f64 = 0.5;

/// Splits `total` hours across `count` items in half-hour units.
///
/// Every item receives at least half an hour. The remaining difference
/// between the budget and the sum is walked round-robin in half-hour steps
/// until it is under half an hour. The walk also stops after `count` full
/// passes or once every item sits at the floor, so the result can overshoot
/// small budgets spread over many items.
///
/// Returns `None` when there is nothing to split.
///
/// ```rust
/// use tally_core::budget::distribute;
///
/// assert_eq!(distribute(10.0, 3), Some(vec![3.0, 3.5, 3.5]));
/// assert_eq!(distribute(0.0, 3), None);
/// ```
pub fn distribute(total: f64, count: usize) -> Option<Vec<f64>> {
    if count == 0 || !total.is_finite() || total <= 0.0 {
        return None;
    }

    let base = round_to_half(total / count as f64).max(HALF_HOUR);
    let mut shares = vec![base; count];
    let mut difference = total - base * count as f64;

    for _ in 0..count {
        let mut changed = false;
        for share in shares.iter_mut() {
            if difference.abs() < HALF_HOUR {
                break;
            }
            if difference > 0.0 {
                *share += HALF_HOUR;
                difference -= HALF_HOUR;
                changed = true;
            } else if *share > HALF_HOUR {
                *share -= HALF_HOUR;
                difference += HALF_HOUR;
                changed = true;
            }
        }
        // Every slot at the floor with budget still overspent.
        if !changed || difference.abs() < HALF_HOUR {
            break;
        }
    }

    Some(shares)
}

/// Rounds to the nearest half hour, halves rounding up.
fn round_to_half(hours: f64) -> f64 {
    (hours * 2.0 + 0.5).floor() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(values: &[f64]) -> f64 {
        values.iter().sum()
    }

    #[test]
    fn test_even_split() {
        assert_eq!(distribute(6.0, 3), Some(vec![2.0, 2.0, 2.0]));
        assert_eq!(distribute(1.0, 1), Some(vec![1.0]));
    }

    #[test]
    fn test_rounding_half_up() {
        // 10 / 3 = 3.33 -> 3.5, overshoot of 0.5 taken back from the first slot
        assert_eq!(distribute(10.0, 3), Some(vec![3.0, 3.5, 3.5]));
        // 5 / 4 = 1.25 -> 1.5 (half rounds up), overshoot of 1.0 taken back
        assert_eq!(distribute(5.0, 4), Some(vec![1.0, 1.0, 1.5, 1.5]));
    }

    #[test]
    fn test_floor_of_half_hour() {
        let shares = distribute(1.0, 4).expect("split");
        assert_eq!(shares, vec![0.5, 0.5, 0.5, 0.5]);
        assert!(shares.iter().all(|&h| h >= HALF_HOUR));
    }

    #[test]
    fn test_many_items_at_floor() {
        let start = std::time::Instant::now();
        let shares = distribute(1.0, 20_000).expect("split");
        assert_eq!(shares.len(), 20_000);
        assert!(shares.iter().all(|&h| h == HALF_HOUR));
        assert!(start.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_no_op_inputs() {
        assert_eq!(distribute(8.0, 0), None);
        assert_eq!(distribute(0.0, 4), None);
        assert_eq!(distribute(-3.0, 4), None);
        assert_eq!(distribute(f64::NAN, 4), None);
    }

    #[test]
    fn test_conservation_bound() {
        for count in 1..=12 {
            for tenths in 1..=400 {
                let total = f64::from(tenths) / 10.0;
                let shares = distribute(total, count).expect("split");
                assert_eq!(shares.len(), count);
                assert!(shares.iter().all(|&h| h >= HALF_HOUR));
                assert!(
                    (sum(&shares) - total).abs() <= HALF_HOUR * count as f64,
                    "total {total} over {count}: {shares:?}"
                );
            }
        }
    }

    #[test]
    fn test_exact_when_representable() {
        let shares = distribute(7.5, 4).expect("split");
        assert_eq!(sum(&shares), 7.5);
    }
}
