//! Checklist completion metric.

use super::ChecklistItem;

/// Percentage of checklist hours that are checked off.
///
/// Returns `None` when the checklist carries no hours at all, which is
/// distinct from `Some(0.0)` (hours exist but none are done). The value is not
/// clamped; callers that render it should clamp for display.
pub fn completion_percentage(checklist: &[ChecklistItem]) -> Option<f64> {
    let (total, completed) = checklist.iter().fold((0.0, 0.0), |(total, done), item| {
        let done = if item.checked { done + item.hours } else { done };
        (total + item.hours, done)
    });

    if total == 0.0 {
        None
    } else {
        Some(100.0 * completed / total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(checked: bool, hours: f64) -> ChecklistItem {
        ChecklistItem {
            text: "item".to_string(),
            checked,
            hours,
            position: 0,
        }
    }

    #[test]
    fn test_example_percentage() {
        let pct = completion_percentage(&[item(true, 2.0), item(false, 3.5)])
            .expect("has hours");
        assert!((pct - 36.3636).abs() < 0.001);
    }

    #[test]
    fn test_no_hours_is_none() {
        assert_eq!(completion_percentage(&[]), None);
        assert_eq!(completion_percentage(&[item(true, 0.0), item(false, 0.0)]), None);
    }

    #[test]
    fn test_zero_and_full() {
        assert_eq!(completion_percentage(&[item(false, 4.0)]), Some(0.0));
        assert_eq!(
            completion_percentage(&[item(true, 1.0), item(true, 0.5)]),
            Some(100.0)
        );
    }

    #[test]
    fn test_bounds() {
        let hours = [0.5, 1.0, 2.5, 4.0, 0.0, 8.0];
        for mask in 0u32..64 {
            let checklist: Vec<_> = hours
                .iter()
                .enumerate()
                .map(|(i, &h)| item(mask & (1 << i) != 0, h))
                .collect();
            if let Some(pct) = completion_percentage(&checklist) {
                assert!((0.0..=100.0).contains(&pct), "mask {mask}: {pct}");
            }
        }
    }
}
