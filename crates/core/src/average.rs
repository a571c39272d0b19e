//! Per-category average reduction.

/// Rounded arithmetic mean of a per-period count sequence.
///
/// An empty sequence averages to exactly 0. Otherwise the mean is
/// rounded half-away-from-zero to the nearest whole number and returned
/// as a float, since category averages are displayed as whole-number
/// valued floats.
pub fn category_average(counts: &[u32]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    let total: u64 = counts.iter().map(|&c| u64::from(c)).sum();
    (total as f64 / counts.len() as f64).round()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
