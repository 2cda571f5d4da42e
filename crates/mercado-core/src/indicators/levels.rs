use crate::PriceLevels;

/// Trailing slice of at most `n` values; shorter inputs are returned whole.
pub fn take_last_up_to<T>(values: &[T], n: usize) -> &[T] {
    &values[values.len().saturating_sub(n)..]
}

/// Support (minimum) and resistance (maximum) bands of a close series.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SupportResistance {
    pub support: PriceLevels,
    pub resistance: PriceLevels,
}

/// Extremes over the trailing `near` and `far` windows.
///
/// Windows longer than the series shrink to the whole series. An empty
/// series has no levels.
pub fn support_resistance(closes: &[f64], near: usize, far: usize) -> SupportResistance {
    let near_window = take_last_up_to(closes, near);
    let far_window = take_last_up_to(closes, far);

    SupportResistance {
        support: PriceLevels {
            level1: min(near_window),
            level2: min(far_window),
        },
        resistance: PriceLevels {
            level1: max(near_window),
            level2: max(far_window),
        },
    }
}

fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}
