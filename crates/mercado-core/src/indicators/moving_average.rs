/// Arithmetic mean of the last `window` closes.
///
/// `None` when fewer than `window` closes exist or `window` is zero.
pub fn simple_moving_average(closes: &[f64], window: usize) -> Option<f64> {
    if window == 0 || closes.len() < window {
        return None;
    }

    let tail = &closes[closes.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// Percentage distance of `price` above (positive) or below `average`.
pub fn distance_percent(price: f64, average: f64) -> Option<f64> {
    if average == 0.0 {
        return None;
    }
    Some((price - average) / average * 100.0)
}
